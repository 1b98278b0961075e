use alloy_primitives::Address;

use crate::config::eth_address;
use crate::models::Network;

/// Wallet connection status, derived from provider queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Initial state before the provider has been queried.
    #[default]
    Checking,
    /// No injected wallet in this browser.
    NoProvider,
    /// Wallet present but exposing no accounts.
    Locked,
    /// Wallet exposes accounts, but this app holds no session yet.
    Unlocked,
    Connected { address: Address, chain_id: u64 },
}

impl ConnectionStatus {
    /// Check if wallet is connected
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    /// Whether a wallet extension was detected.
    pub fn has_provider(&self) -> bool {
        !matches!(self, Self::Checking | Self::NoProvider)
    }

    /// Get chain ID if connected
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Connected { chain_id, .. } => Some(*chain_id),
            _ => None,
        }
    }

    /// Get address if connected
    pub fn address(&self) -> Option<Address> {
        match self {
            Self::Connected { address, .. } => Some(*address),
            _ => None,
        }
    }

    /// Registry entry for the connected chain, if connected and supported.
    pub fn network(&self) -> Option<&'static Network> {
        self.chain_id().and_then(Network::by_id)
    }

    /// Format for display (0x1234...5678 when connected)
    pub fn display_name(&self) -> String {
        match self {
            Self::Connected { address, .. } => {
                let full = address.to_string();
                if full.len() >= eth_address::FULL_LEN {
                    format!(
                        "{}...{}",
                        &full[..eth_address::PREFIX_LEN],
                        &full[eth_address::SUFFIX_START..]
                    )
                } else {
                    full
                }
            }
            Self::Checking => "checking...".to_string(),
            Self::NoProvider => "no wallet".to_string(),
            Self::Locked => "locked".to_string(),
            Self::Unlocked => "not connected".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_checking_state() {
        let state = ConnectionStatus::Checking;
        assert!(!state.is_connected());
        assert!(!state.has_provider());
        assert_eq!(state.chain_id(), None);
        assert_eq!(state.display_name(), "checking...");
    }

    #[test]
    fn test_locked_and_unlocked() {
        assert!(ConnectionStatus::Locked.has_provider());
        assert!(ConnectionStatus::Unlocked.has_provider());
        assert!(!ConnectionStatus::Unlocked.is_connected());
        assert_eq!(ConnectionStatus::NoProvider.display_name(), "no wallet");
    }

    #[test]
    fn test_connected_state() {
        let state = ConnectionStatus::Connected {
            address: address!("1234567890123456789012345678901234567890"),
            chain_id: 137,
        };
        assert!(state.is_connected());
        assert_eq!(state.chain_id(), Some(137));
        assert_eq!(state.network().map(|n| n.name), Some("Polygon"));
        assert_eq!(state.display_name(), "0x1234...7890");
    }

    #[test]
    fn test_connected_unsupported_chain() {
        let state = ConnectionStatus::Connected {
            address: Address::ZERO,
            chain_id: 56,
        };
        assert_eq!(state.chain_id(), Some(56));
        assert!(state.network().is_none());
    }

    #[test]
    fn test_default() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Checking);
    }
}
