//! Wallet domain module.
//!
//! # Module Structure
//!
//! - `connector`: Closed catalog of wallet connectors (`WalletConnector`)
//! - `chain`: Known networks (`Chain`)
//! - `provider`: Wallet provider boundary (`WalletProvider`, `ProviderError`)
//! - `resolver`: Name resolution boundary (`NameResolver`)
//! - `address`: Address display helpers

mod address;
mod chain;
mod connector;
mod provider;
mod resolver;

// Re-export public API
pub use address::{format_address, truncate_address};
pub use chain::{Chain, chain_label};
pub use connector::WalletConnector;
pub use provider::{ProviderError, USER_REJECTED_CODE, WalletProvider};
pub use resolver::{NameResolver, NoopNameResolver};
