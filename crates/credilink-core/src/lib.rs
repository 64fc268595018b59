pub mod config;
pub mod error;
pub mod session;
pub mod wallet;

// Re-export common error type
pub use error::{CredError, Result};
