pub mod config_service;
pub mod local_storage_session_store;
pub mod paths;
pub mod storage;
pub mod wallet;

pub use crate::config_service::ConfigService;
pub use crate::local_storage_session_store::LocalStorageSessionStore;
pub use crate::paths::CredilinkPaths;
pub use crate::storage::LocalStorage;
pub use crate::wallet::{HttpNameResolver, JsonRpcWalletProvider};
