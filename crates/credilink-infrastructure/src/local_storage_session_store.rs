//! Session store backed by [`LocalStorage`].

use crate::storage::{AtomicJsonError, LocalStorage};
use async_trait::async_trait;
use credilink_core::config::DEFAULT_STORAGE_KEY;
use credilink_core::error::{CredError, Result};
use credilink_core::session::{Session, SessionStore};

impl From<AtomicJsonError> for CredError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Json(e) => e.into(),
            AtomicJsonError::Io(e) => e.into(),
            AtomicJsonError::Lock(message) => CredError::io(message),
        }
    }
}

/// Keeps the active session as one JSON string under a single storage key.
///
/// The record is written and read as-is: no version tag, no migration.
#[derive(Debug, Clone)]
pub struct LocalStorageSessionStore {
    storage: LocalStorage,
    key: String,
}

impl LocalStorageSessionStore {
    pub fn new(storage: LocalStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Uses the default `credilink_user` key.
    pub fn with_default_key(storage: LocalStorage) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Runs a blocking storage call off the async executor.
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&LocalStorage, &str) -> Result<T> + Send + 'static,
    {
        let storage = self.storage.clone();
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || f(&storage, &key))
            .await
            .map_err(|e| CredError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SessionStore for LocalStorageSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        self.blocking(|storage, key| match storage.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        })
        .await
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.blocking(move |storage, key| Ok(storage.set_item(key, raw)?))
            .await
    }

    async fn clear(&self) -> Result<()> {
        let removed = self
            .blocking(|storage, key| Ok(storage.remove_item(key)?))
            .await?;
        if removed {
            tracing::debug!("[LocalStorage] Removed key {}", self.key);
        }
        Ok(())
    }
}
