//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml`. A missing file yields defaults.

use crate::paths::CredilinkPaths;
use credilink_core::config::AppConfig;
use credilink_core::error::{CredError, Result};
use std::path::{Path, PathBuf};

/// Loads the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `config.toml` in the resolved config directory.
    pub fn from_paths(paths: &CredilinkPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| CredError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] {} not found, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CredilinkPaths::new(Some(temp_dir.path().to_path_buf()));
        std::fs::write(
            paths.config_file().unwrap(),
            "storage_key = \"custom_user\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = ConfigService::from_paths(&paths).unwrap().load().unwrap();
        assert_eq!(config.storage_key, "custom_user");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.rpc_url, AppConfig::default().rpc_url);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "storage_key = [").unwrap();

        let err = ConfigService::new(path).load().unwrap_err();
        assert!(err.is_serialization());
    }
}
