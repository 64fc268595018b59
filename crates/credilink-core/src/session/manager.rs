use super::event::SessionEvent;
use super::model::{OAuthProvider, ProfileUpdate, Session, UserRole};
use super::repository::SessionStore;
use crate::error::{CredError, Result};
use crate::wallet::{NameResolver, WalletConnector, WalletProvider};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 32;

/// Settings the manager needs beyond its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Base URL of the placeholder avatar service used for OAuth logins.
    pub avatar_base_url: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            avatar_base_url: crate::config::DEFAULT_AVATAR_BASE_URL.to_string(),
        }
    }
}

/// Owns the current authenticated user.
///
/// `SessionManager` is responsible for:
/// - Restoring the persisted session on startup
/// - Wallet and OAuth login
/// - Logout, profile edits and chain switches
/// - Publishing the current session, the in-flight flag and notifications
///
/// It is constructed explicitly and shared by reference (or `Arc`); there is
/// no global instance. Dropping it releases the channels and collaborators.
pub struct SessionManager {
    /// Single-slot persistence for the active session
    store: Arc<dyn SessionStore>,
    /// Injected wallet, `None` when the host has no provider
    wallet: Option<Arc<dyn WalletProvider>>,
    resolver: Arc<dyn NameResolver>,
    settings: SessionSettings,
    /// Current session; the watch value is the in-memory state
    session: watch::Sender<Option<Session>>,
    /// True while a provider-bound operation is in flight
    loading: watch::Sender<bool>,
    events: broadcast::Sender<SessionEvent>,
}

/// Releases the loading flag on every exit path.
struct LoadingGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

impl SessionManager {
    /// Creates a manager with no active session.
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence for the active session
    /// * `wallet` - The injected wallet provider, if one was detected
    /// * `resolver` - Best-effort reverse name lookup
    /// * `settings` - Avatar and other presentation settings
    pub fn new(
        store: Arc<dyn SessionStore>,
        wallet: Option<Arc<dyn WalletProvider>>,
        resolver: Arc<dyn NameResolver>,
        settings: SessionSettings,
    ) -> Self {
        let (session, _) = watch::channel(None);
        let (loading, _) = watch::channel(false);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            store,
            wallet,
            resolver,
            settings,
            session,
            loading,
            events,
        }
    }

    /// Creates a manager and restores any persisted session.
    pub async fn init(
        store: Arc<dyn SessionStore>,
        wallet: Option<Arc<dyn WalletProvider>>,
        resolver: Arc<dyn NameResolver>,
        settings: SessionSettings,
    ) -> Self {
        let manager = Self::new(store, wallet, resolver, settings);
        manager.restore().await;
        manager
    }

    /// Loads the persisted session and makes it active.
    ///
    /// The record is trusted as-is; it is not checked against the wallet.
    /// A slot that cannot be read or parsed counts as "no session".
    pub async fn restore(&self) -> Option<Session> {
        match self.store.load().await {
            Ok(Some(session)) => {
                tracing::info!("[Session] Restored session {}", session.id());
                self.session.send_replace(Some(session.clone()));
                Some(session)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("[Session] Ignoring unreadable persisted session: {}", e);
                None
            }
        }
    }

    /// Returns the active session, if any.
    pub fn current(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    /// Returns whether a provider-bound operation is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Whether a wallet provider was detected.
    pub fn has_wallet(&self) -> bool {
        self.wallet.is_some()
    }

    /// Observes the active session. The receiver sees every change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    /// Observes the in-flight flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Receives transient notifications published after this call.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Looks up a name or an address through the resolver.
    ///
    /// `0x`-prefixed input is reverse-resolved to a name; anything else is
    /// resolved to an address. Failures answer `None`.
    pub async fn lookup_name(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if query.starts_with("0x") || query.starts_with("0X") {
            self.resolver.reverse_resolve(query).await
        } else {
            self.resolver.resolve(query).await
        }
    }

    /// Logs in through a wallet connector.
    ///
    /// Overwrites any prior session. On failure the session is left as it
    /// was and a `LoginFailed` notification is published.
    ///
    /// # Errors
    ///
    /// - `Busy` if another login or chain switch is in flight
    /// - `ConnectorNotImplemented` for catalog entries without an implementation
    /// - `ProviderNotFound` if no wallet was detected
    /// - `ProviderRejected` if the wallet declined or failed
    /// - `NoAccounts` if the wallet exposed no account
    pub async fn login(&self, connector: WalletConnector, role: UserRole) -> Result<Session> {
        let _guard = self.begin()?;

        match self.connect_wallet(connector, role).await {
            Ok(session) => {
                tracing::info!(
                    "[Session] Wallet login as {} via {}",
                    role.as_noun(),
                    connector
                );
                self.notify(SessionEvent::LoggedIn {
                    session_id: session.id().to_string(),
                    role,
                    oauth: None,
                });
                Ok(session)
            }
            Err(e) => {
                tracing::warn!("[Session] Wallet login failed: {}", e);
                self.notify(SessionEvent::LoginFailed {
                    oauth: None,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn connect_wallet(&self, connector: WalletConnector, role: UserRole) -> Result<Session> {
        if !connector.is_implemented() {
            return Err(CredError::ConnectorNotImplemented(connector));
        }
        let wallet = self.wallet.as_ref().ok_or(CredError::ProviderNotFound)?;

        let accounts = wallet
            .request_accounts()
            .await
            .map_err(|e| CredError::provider_rejected(e.to_string()))?;
        let address = accounts
            .into_iter()
            .find(|account| !account.is_empty())
            .ok_or(CredError::NoAccounts)?;

        let chain_id = match wallet.chain_id().await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("[Session] Could not read chain id: {}", e);
                None
            }
        };

        let ens_name = self.resolver.reverse_resolve(&address).await;
        if ens_name.is_none() {
            tracing::debug!("[Session] No name found for {}", address);
        }

        let session = Session::from_wallet(address, ens_name, role, connector, chain_id);
        self.commit(session).await
    }

    /// Logs in with a mocked OAuth identity.
    ///
    /// No network call is made. The session is marked verified and gets a
    /// placeholder email and avatar derived from the provider name.
    pub async fn login_with_oauth(
        &self,
        provider: OAuthProvider,
        role: UserRole,
    ) -> Result<Session> {
        let _guard = self.begin()?;

        let session = Session::from_oauth(provider, role, &self.settings.avatar_base_url);
        match self.commit(session).await {
            Ok(session) => {
                tracing::info!("[Session] OAuth login as {} via {}", role.as_noun(), provider);
                self.notify(SessionEvent::LoggedIn {
                    session_id: session.id().to_string(),
                    role,
                    oauth: Some(provider),
                });
                Ok(session)
            }
            Err(e) => {
                self.notify(SessionEvent::LoginFailed {
                    oauth: Some(provider),
                    reason: format!("Failed to login with {}", provider),
                });
                Err(e)
            }
        }
    }

    /// Clears the in-memory and persisted session.
    ///
    /// Calling it with no active session only empties the slot; no
    /// notification is published.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;

        let previous = self.session.send_replace(None);
        if let Some(previous) = previous {
            tracing::info!("[Session] Logged out {}", previous.id());
            self.notify(SessionEvent::LoggedOut);
        }
        Ok(())
    }

    /// Merges profile fields into the active session and persists it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))`: The updated session
    /// - `Ok(None)`: No session is active; nothing happened
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Option<Session>> {
        let Some(mut session) = self.current() else {
            tracing::debug!("[Session] Profile update without active session ignored");
            return Ok(None);
        };

        session.apply(update);
        let session = self.commit(session).await?;
        self.notify(SessionEvent::ProfileUpdated {
            session_id: session.id().to_string(),
        });
        Ok(Some(session))
    }

    /// Asks the wallet to switch networks and records the new chain id.
    ///
    /// There is no retry. On provider failure the session is unchanged and
    /// a `ChainSwitchFailed` notification is published.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))`: The session with its new chain id
    /// - `Ok(None)`: No session is active; the wallet was not contacted
    pub async fn switch_chain(&self, chain_id: u64) -> Result<Option<Session>> {
        if self.session.borrow().is_none() {
            tracing::debug!("[Session] Chain switch without active session ignored");
            return Ok(None);
        }
        let _guard = self.begin()?;

        let outcome = match self.wallet.as_ref() {
            None => Err(CredError::ProviderNotFound),
            Some(wallet) => wallet.switch_chain(chain_id).await.map_err(|e| {
                CredError::ChainSwitchFailed {
                    chain_id,
                    reason: e.to_string(),
                }
            }),
        };
        if let Err(e) = outcome {
            tracing::warn!("[Session] Chain switch failed: {}", e);
            self.notify(SessionEvent::ChainSwitchFailed {
                chain_id,
                reason: e.to_string(),
            });
            return Err(e);
        }

        // The session may have been logged out while the wallet prompt was open.
        let Some(mut session) = self.current() else {
            return Ok(None);
        };
        session.set_chain_id(chain_id);
        let session = self.commit(session).await?;

        tracing::info!("[Session] Switched to chain {}", chain_id);
        self.notify(SessionEvent::ChainSwitched { chain_id });
        Ok(Some(session))
    }

    /// Persists a session, then makes it the in-memory state.
    async fn commit(&self, session: Session) -> Result<Session> {
        self.store.save(&session).await?;
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Claims the loading flag, failing fast if it is already held.
    fn begin(&self) -> Result<LoadingGuard<'_>> {
        let claimed = self.loading.send_if_modified(|busy| {
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        });

        if claimed {
            Ok(LoadingGuard {
                flag: &self.loading,
            })
        } else {
            Err(CredError::Busy)
        }
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is fine; notifications are transient.
        let _ = self.events.send(event);
    }
}
