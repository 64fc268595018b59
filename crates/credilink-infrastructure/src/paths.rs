//! Unified path management for credilink files.
//!
//! ```text
//! ~/.config/credilink/          # Config directory
//! └── config.toml               # Application configuration
//!
//! ~/.local/share/credilink/     # Data directory
//! └── local_storage.json        # Key-value store holding the session
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "credilink";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Home directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

/// Path resolution for credilink.
///
/// Uses the platform directories from `dirs` unless a root override is
/// given, in which case config and data both live directly under it.
#[derive(Debug, Clone, Default)]
pub struct CredilinkPaths {
    root_override: Option<PathBuf>,
}

impl CredilinkPaths {
    /// # Arguments
    ///
    /// * `root_override` - Directory to use instead of the platform defaults
    pub fn new(root_override: Option<PathBuf>) -> Self {
        Self { root_override }
    }

    /// Returns the config directory (e.g. `~/.config/credilink/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(root) = &self.root_override {
            return Ok(root.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/credilink/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(root) = &self.root_override {
            return Ok(root.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Directory holding the local key-value store.
    pub fn storage_dir(&self) -> Result<PathBuf, PathError> {
        self.data_dir()
    }
}
