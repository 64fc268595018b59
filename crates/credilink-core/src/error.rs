//! Error types for the CrediLink session layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::WalletConnector;

/// A shared error type for the session layer.
///
/// Each user-facing failure gets its own variant so the message shown to
/// the user stays specific ("no provider" is not "provider rejected").
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CredError {
    /// No wallet provider is injected into the host.
    #[error("No wallet provider detected. Install MetaMask or another browser wallet to continue.")]
    ProviderNotFound,

    /// The selected connector exists in the catalog but has no implementation.
    #[error("{} is not supported yet. Use the browser wallet connector instead.", .0.display_name())]
    ConnectorNotImplemented(WalletConnector),

    /// The provider answered the account request with an empty list.
    #[error("No accounts found. Unlock your wallet and try again.")]
    NoAccounts,

    /// The provider refused the request or failed while handling it.
    #[error("Failed to connect to wallet: {0}")]
    ProviderRejected(String),

    /// The provider refused a network switch.
    #[error("Failed to switch to chain {chain_id}: {reason}")]
    ChainSwitchFailed { chain_id: u64, reason: String },

    /// Another session operation is still in flight.
    #[error("Another session operation is already in progress")]
    Busy,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CredError {
    /// Creates a ProviderRejected error
    pub fn provider_rejected(reason: impl Into<String>) -> Self {
        Self::ProviderRejected(reason.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CredError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CredError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CredError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CredError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CredError>`.
pub type Result<T> = std::result::Result<T, CredError>;
