//! Storage layer for atomic file operations.

mod atomic_json;
mod local_storage;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use local_storage::{LOCAL_STORAGE_FILE, LocalStorage};
