//! Application configuration model.

use serde::{Deserialize, Serialize};

use crate::session::SessionSettings;

pub const DEFAULT_STORAGE_KEY: &str = "credilink_user";
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_ENS_API_URL: &str = "https://api.ensideas.com/ens/resolve";
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Root configuration, read from `config.toml`.
///
/// Every field has a default, so a missing file or a partial one is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key of the local storage slot holding the session
    pub storage_key: String,
    /// JSON-RPC endpoint of the wallet provider
    pub rpc_url: String,
    /// Base URL of the ENS lookup service
    pub ens_api_url: String,
    pub avatar_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            ens_api_url: DEFAULT_ENS_API_URL.to_string(),
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            avatar_base_url: self.avatar_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(r#"rpc_url = "http://localhost:9545""#).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:9545");
        assert_eq!(config.storage_key, "credilink_user");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
