//! Known EVM networks.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Networks the platform is configured for.
///
/// Chain ids outside this list are still accepted by the session layer as
/// raw `u64` values; this enum only carries names for the known ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[strum(to_string = "Ethereum")]
    Mainnet,
    #[strum(to_string = "Polygon")]
    Polygon,
    #[strum(to_string = "BNB Smart Chain")]
    Bsc,
}

impl Chain {
    pub const fn id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Polygon => 137,
            Self::Bsc => 56,
        }
    }

    pub const fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Self::Mainnet),
            137 => Some(Self::Polygon),
            56 => Some(Self::Bsc),
            _ => None,
        }
    }
}

/// Human-readable label for a chain id, falling back to the number.
pub fn chain_label(id: u64) -> String {
    match Chain::from_id(id) {
        Some(chain) => format!("{} ({})", chain, id),
        None => format!("chain {}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_id_lookup_is_consistent() {
        for chain in Chain::iter() {
            assert_eq!(Chain::from_id(chain.id()), Some(chain));
        }
        assert_eq!(Chain::from_id(10), None);
    }

    #[test]
    fn test_chain_label() {
        assert_eq!(chain_label(137), "Polygon (137)");
        assert_eq!(chain_label(31337), "chain 31337");
    }
}
