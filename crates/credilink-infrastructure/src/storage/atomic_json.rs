//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe concurrent access to small JSON documents.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during atomic JSON operations.
#[derive(Debug, Error)]
pub enum AtomicJsonError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// File locking error.
    #[error("Lock error: {0}")]
    Lock(String),
}

/// A handle to a JSON file updated with write-to-temp and rename.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: An exclusive lock file serializes read-modify-write cycles
/// - **Durability**: Explicit fsync before rename
#[derive(Debug, Clone)]
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes data to the file atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Runs a read-modify-write cycle under the file lock.
    ///
    /// A missing or unparsable file starts from `T::default()` and is
    /// replaced on write. The closure's return value is passed through; the
    /// data is written back only after it returns.
    pub fn update<F, R>(&self, f: F) -> Result<R, AtomicJsonError>
    where
        T: Default,
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(data) => data.unwrap_or_default(),
            Err(AtomicJsonError::Json(e)) => {
                tracing::warn!(
                    "[AtomicJson] Discarding unparsable {}: {}",
                    self.path.display(),
                    e
                );
                T::default()
            }
            Err(e) => return Err(e),
        };
        let result = f(&mut data);
        self.save(&data)?;

        Ok(result)
    }

    /// Reads the file under the lock, so a concurrent update is never seen half-applied.
    pub fn read(&self) -> Result<Option<T>, AtomicJsonError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.load()
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name")
        })?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| AtomicJsonError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        use fs2::FileExt;
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    type Map = BTreeMap<String, u32>;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Map>::new(temp_dir.path().join("missing.json"));

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_starts_from_default() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Map>::new(temp_dir.path().join("nested/data.json"));

        let previous = file
            .update(|map| map.insert("count".to_string(), 10))
            .unwrap();
        assert_eq!(previous, None);

        let previous = file
            .update(|map| map.insert("count".to_string(), 15))
            .unwrap();
        assert_eq!(previous, Some(10));

        assert_eq!(file.read().unwrap().unwrap()["count"], 15);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        let file = AtomicJsonFile::<Map>::new(path.clone());

        file.save(&Map::new()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".data.json.tmp").exists());
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{ nope").unwrap();

        let file = AtomicJsonFile::<Map>::new(path);
        assert!(matches!(file.load(), Err(AtomicJsonError::Json(_))));
    }

    #[test]
    fn test_update_replaces_corrupted_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{ truncated").unwrap();

        let file = AtomicJsonFile::<Map>::new(path);
        let previous = file
            .update(|map| map.insert("count".to_string(), 1))
            .unwrap();

        assert_eq!(previous, None);
        assert_eq!(file.load().unwrap().unwrap()["count"], 1);
    }
}
