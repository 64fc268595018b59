//! File-backed string key-value store.
//!
//! The desktop counterpart of a browser's `localStorage`: string keys
//! mapped to string values, kept in one JSON document.

use super::atomic_json::{AtomicJsonError, AtomicJsonFile};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

/// String key-value store persisted to a single JSON file.
///
/// Every call goes to disk, so two handles on the same file observe each
/// other's writes.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    file: AtomicJsonFile<BTreeMap<String, String>>,
}

impl LocalStorage {
    /// Opens the store backed by `path`. The file is created on first write.
    pub fn open(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Opens `local_storage.json` inside `dir`.
    pub fn in_dir(dir: PathBuf) -> Self {
        Self::open(dir.join(LOCAL_STORAGE_FILE))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, AtomicJsonError> {
        Ok(self.file.read()?.and_then(|mut items| items.remove(key)))
    }

    pub fn set_item(&self, key: &str, value: String) -> Result<(), AtomicJsonError> {
        self.file.update(|items| {
            items.insert(key.to_string(), value);
        })
    }

    /// Removes a key. Returns whether it was present.
    pub fn remove_item(&self, key: &str) -> Result<bool, AtomicJsonError> {
        if !self.file.path().exists() {
            return Ok(false);
        }
        self.file.update(|items| items.remove(key).is_some())
    }

    pub fn keys(&self) -> Result<Vec<String>, AtomicJsonError> {
        Ok(self
            .file
            .read()?
            .map(|items| items.into_keys().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::in_dir(temp_dir.path().to_path_buf());

        assert_eq!(storage.get_item("theme").unwrap(), None);

        storage.set_item("theme", "dark".to_string()).unwrap();
        storage.set_item("lang", "en".to_string()).unwrap();
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.keys().unwrap(), vec!["lang", "theme"]);

        assert!(storage.remove_item("theme").unwrap());
        assert!(!storage.remove_item("theme").unwrap());
        assert_eq!(storage.get_item("theme").unwrap(), None);
        assert_eq!(storage.get_item("lang").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        LocalStorage::in_dir(temp_dir.path().to_path_buf())
            .set_item("k", "v".to_string())
            .unwrap();

        let reopened = LocalStorage::in_dir(temp_dir.path().to_path_buf());
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_remove_on_missing_file_does_not_create_it() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::in_dir(temp_dir.path().to_path_buf());

        assert!(!storage.remove_item("k").unwrap());
        assert!(!temp_dir.path().join(LOCAL_STORAGE_FILE).exists());
    }
}
