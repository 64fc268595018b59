//! Wallet connector catalog.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A named integration path to a wallet.
///
/// The set is closed: adding a connector means adding a variant and
/// deciding its [`WalletConnector::is_implemented`] answer at compile time.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WalletConnector {
    /// The wallet injected into the host (MetaMask and friends).
    #[default]
    #[serde(alias = "metamask")]
    #[strum(to_string = "injected", serialize = "metamask")]
    Injected,
    /// WalletConnect bridge to mobile wallets.
    WalletConnect,
    /// Coinbase Wallet SDK.
    Coinbase,
}

impl WalletConnector {
    /// Whether a login through this connector can succeed at all.
    pub const fn is_implemented(self) -> bool {
        match self {
            Self::Injected => true,
            Self::WalletConnect | Self::Coinbase => false,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Injected => "MetaMask",
            Self::WalletConnect => "WalletConnect",
            Self::Coinbase => "Coinbase Wallet",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Injected => "Connect using MetaMask wallet",
            Self::WalletConnect => "Connect with any mobile wallet",
            Self::Coinbase => "Connect using Coinbase Wallet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_connector_ids() {
        assert_eq!(
            WalletConnector::from_str("injected").unwrap(),
            WalletConnector::Injected
        );
        assert_eq!(
            WalletConnector::from_str("MetaMask").unwrap(),
            WalletConnector::Injected
        );
        assert_eq!(
            WalletConnector::from_str("walletconnect").unwrap(),
            WalletConnector::WalletConnect
        );
        assert!(WalletConnector::from_str("phantom").is_err());
    }

    #[test]
    fn test_only_injected_is_implemented() {
        let implemented: Vec<_> = WalletConnector::iter()
            .filter(|c| c.is_implemented())
            .collect();
        assert_eq!(implemented, vec![WalletConnector::Injected]);
        assert_eq!(WalletConnector::default(), WalletConnector::Injected);
    }

    #[test]
    fn test_display_matches_serde() {
        for connector in WalletConnector::iter() {
            let json = serde_json::to_string(&connector).unwrap();
            assert_eq!(json, format!("\"{}\"", connector));
        }
    }
}
