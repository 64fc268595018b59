use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use credilink_core::config::AppConfig;
use credilink_core::session::SessionManager;
use credilink_core::wallet::{NameResolver, NoopNameResolver, WalletProvider};
use credilink_infrastructure::{
    ConfigService, CredilinkPaths, HttpNameResolver, JsonRpcWalletProvider, LocalStorage,
    LocalStorageSessionStore,
};

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    pub home: Option<PathBuf>,
    pub rpc_url: Option<String>,
    pub no_wallet: bool,
}

/// Loads the configuration, applying command-line overrides.
pub fn load_config(paths: &CredilinkPaths, options: &BootstrapOptions) -> Result<AppConfig> {
    let service = ConfigService::from_paths(paths)?;
    let mut config = service
        .load()
        .map_err(|e| anyhow!("Failed to load {}: {}", service.path().display(), e))?;

    if let Some(rpc_url) = &options.rpc_url {
        config.rpc_url = rpc_url.clone();
    }
    Ok(config)
}

/// Builds the wallet provider, or `None` when no provider is available.
///
/// An empty `rpc_url` counts as "no wallet installed".
fn wallet_provider(
    config: &AppConfig,
    options: &BootstrapOptions,
) -> Result<Option<Arc<dyn WalletProvider>>> {
    if options.no_wallet || config.rpc_url.trim().is_empty() {
        tracing::info!("[Bootstrap] Running without a wallet provider");
        return Ok(None);
    }

    let provider = JsonRpcWalletProvider::new(
        config.rpc_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .map_err(|e| anyhow!("Failed to create wallet provider: {}", e))?;
    Ok(Some(Arc::new(provider)))
}

fn name_resolver(config: &AppConfig) -> Arc<dyn NameResolver> {
    if config.ens_api_url.trim().is_empty() {
        return Arc::new(NoopNameResolver);
    }

    match HttpNameResolver::new(
        config.ens_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(resolver) => Arc::new(resolver),
        Err(e) => {
            tracing::warn!("[Bootstrap] Name resolution disabled: {}", e);
            Arc::new(NoopNameResolver)
        }
    }
}

/// Wires a session manager from configuration and restores the stored session.
pub async fn bootstrap(options: &BootstrapOptions) -> Result<SessionManager> {
    let paths = CredilinkPaths::new(options.home.clone());
    let config = load_config(&paths, options)?;

    let storage_dir = paths
        .storage_dir()
        .map_err(|e| anyhow!("Failed to resolve storage directory: {}", e))?;
    tracing::debug!("[Bootstrap] Local storage in {}", storage_dir.display());

    let store = LocalStorageSessionStore::new(
        LocalStorage::in_dir(storage_dir),
        config.storage_key.clone(),
    );

    let manager = SessionManager::init(
        Arc::new(store),
        wallet_provider(&config, options)?,
        name_resolver(&config),
        config.session_settings(),
    )
    .await;

    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use credilink_core::session::{OAuthProvider, UserRole};
    use tempfile::TempDir;

    fn offline(dir: &TempDir) -> BootstrapOptions {
        BootstrapOptions {
            home: Some(dir.path().to_path_buf()),
            rpc_url: None,
            no_wallet: true,
        }
    }

    #[test]
    fn test_rpc_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CredilinkPaths::new(Some(temp_dir.path().to_path_buf()));
        let options = BootstrapOptions {
            rpc_url: Some("http://localhost:9999".to_string()),
            ..offline(&temp_dir)
        };

        let config = load_config(&paths, &options).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:9999");
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "ens_api_url = \"\"\n").unwrap();

        let manager = bootstrap(&offline(&temp_dir)).await.unwrap();
        assert!(!manager.has_wallet());
        let session = manager
            .login_with_oauth(OAuthProvider::Google, UserRole::Student)
            .await
            .unwrap();
        drop(manager);

        let restarted = bootstrap(&offline(&temp_dir)).await.unwrap();
        assert_eq!(restarted.current(), Some(session));

        restarted.logout().await.unwrap();
        let after_logout = bootstrap(&offline(&temp_dir)).await.unwrap();
        assert_eq!(after_logout.current(), None);
    }

    #[tokio::test]
    async fn test_login_after_corrupted_storage() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "ens_api_url = \"\"\n").unwrap();
        std::fs::write(temp_dir.path().join("local_storage.json"), "{ truncated").unwrap();

        let manager = bootstrap(&offline(&temp_dir)).await.unwrap();
        assert_eq!(manager.current(), None);

        manager
            .login_with_oauth(OAuthProvider::Github, UserRole::Student)
            .await
            .unwrap();
        manager.logout().await.unwrap();
        assert_eq!(manager.current(), None);
    }
}
