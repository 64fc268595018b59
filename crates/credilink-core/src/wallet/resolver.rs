//! Name resolution boundary.

use async_trait::async_trait;

/// Best-effort lookup between wallet addresses and human-readable names.
///
/// Both directions are infallible by signature: implementations swallow
/// their own failures and answer `None`.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Looks up the primary name for an address.
    async fn reverse_resolve(&self, address: &str) -> Option<String>;

    /// Looks up the address a name points at.
    async fn resolve(&self, name: &str) -> Option<String>;
}

/// Resolver that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNameResolver;

#[async_trait]
impl NameResolver for NoopNameResolver {
    async fn reverse_resolve(&self, _address: &str) -> Option<String> {
        None
    }

    async fn resolve(&self, _name: &str) -> Option<String> {
        None
    }
}
