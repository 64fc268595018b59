//! Wallet provider boundary.
//!
//! Defines the interface the session layer uses to talk to a wallet. The
//! provider's internals (key management, signing, RPC transport) live
//! behind this trait.

use async_trait::async_trait;
use thiserror::Error;

/// EIP-1193 code for "the user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors raised by a wallet provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The user declined the prompt.
    #[error("User rejected the request")]
    UserRejected,

    /// The provider answered with a JSON-RPC error object.
    #[error("Provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The provider could not be reached.
    #[error("Provider unreachable: {0}")]
    Transport(String),

    /// The provider answered with something that is not the expected shape.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Maps a JSON-RPC error object, folding the rejection code into its own variant.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            Self::UserRejected
        } else {
            Self::Rpc {
                code,
                message: message.into(),
            }
        }
    }
}

/// An abstract wallet provider.
///
/// Mirrors the three calls the session layer makes on an injected
/// provider: account access, chain id query, and network switch. Each call
/// may suspend for as long as the wallet keeps its prompt open.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Requests account access. May prompt the user.
    ///
    /// # Returns
    ///
    /// - `Ok(accounts)`: Accounts the user exposed, possibly empty
    /// - `Err(_)`: The user declined or the provider failed
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Returns the chain id currently selected in the wallet.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Asks the wallet to switch to another network.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_code_maps_to_user_rejected() {
        assert_eq!(
            ProviderError::from_rpc(4001, "User denied account authorization"),
            ProviderError::UserRejected
        );
        assert_eq!(
            ProviderError::from_rpc(-32603, "Internal error"),
            ProviderError::Rpc {
                code: -32603,
                message: "Internal error".to_string()
            }
        );
    }
}
