//! Blockchain network records and registry lookups.

use crate::config::{DEFAULT_EXPLORER_URL, NETWORKS};

/// A supported blockchain network.
///
/// Instances live in the static [`NETWORKS`] registry and are never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Network {
    /// EIP-155 chain id.
    pub id: u64,
    pub name: &'static str,
    /// Symbol of the native currency.
    pub symbol: &'static str,
    pub icon: &'static str,
    pub is_testnet: bool,
    /// Block explorer base URL (no trailing slash).
    pub explorer_url: &'static str,
}

impl Network {
    /// Look up a network by chain id.
    pub fn by_id(id: u64) -> Option<&'static Network> {
        NETWORKS.iter().find(|network| network.id == id)
    }

    /// Whether `id` belongs to a registered network.
    pub fn is_supported(id: u64) -> bool {
        Self::by_id(id).is_some()
    }

    /// Explorer link for a transaction hash on this network.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}

/// Display name for a chain id, or `"Unknown Network"`.
pub fn network_name(id: u64) -> &'static str {
    Network::by_id(id).map_or("Unknown Network", |n| n.name)
}

/// Native currency symbol for a chain id, or `"Unknown"`.
pub fn network_symbol(id: u64) -> &'static str {
    Network::by_id(id).map_or("Unknown", |n| n.symbol)
}

/// Explorer link for a transaction, falling back to Etherscan for unknown chains.
pub fn explorer_tx_url(chain_id: u64, tx_hash: &str) -> String {
    match Network::by_id(chain_id) {
        Some(network) => network.tx_url(tx_hash),
        None => format!("{}/tx/{}", DEFAULT_EXPLORER_URL, tx_hash),
    }
}
