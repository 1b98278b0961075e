//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application,
//! including the static network and token registries.

use alloy_primitives::address;

use crate::models::{Network, Token, TokenAddress};

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "chainpanel";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where users without a wallet extension are sent.
pub const WALLET_INSTALL_URL: &str = "https://metamask.io/download/";

// =============================================================================
// Amount Display
// =============================================================================

/// Decimals of every native currency in the registry.
pub const NATIVE_DECIMALS: u8 = 18;

/// Fractional digits used when quoting an available balance.
pub const BALANCE_DISPLAY_PLACES: u8 = 6;

/// Ethereum address display truncation.
pub mod eth_address {
    /// Characters kept from the start (`0x` plus four hex digits).
    pub const PREFIX_LEN: usize = 6;
    /// Index where the kept suffix starts.
    pub const SUFFIX_START: usize = 38;
    /// Length of a full `0x`-prefixed address.
    pub const FULL_LEN: usize = 42;
}

// =============================================================================
// Network Registry
// =============================================================================

/// Explorer used when a chain has no registry entry.
pub const DEFAULT_EXPLORER_URL: &str = "https://etherscan.io";

/// Supported networks, in display order. Ids are unique.
pub const NETWORKS: &[Network] = &[
    Network {
        id: 1,
        name: "Ethereum Mainnet",
        symbol: "ETH",
        icon: "🔷",
        is_testnet: false,
        explorer_url: "https://etherscan.io",
    },
    Network {
        id: 11155111,
        name: "Sepolia Testnet",
        symbol: "ETH",
        icon: "🧪",
        is_testnet: true,
        explorer_url: "https://sepolia.etherscan.io",
    },
    Network {
        id: 137,
        name: "Polygon",
        symbol: "MATIC",
        icon: "🟣",
        is_testnet: false,
        explorer_url: "https://polygonscan.com",
    },
    Network {
        id: 80001,
        name: "Polygon Mumbai",
        symbol: "MATIC",
        icon: "🧪",
        is_testnet: true,
        explorer_url: "https://mumbai.polygonscan.com",
    },
    Network {
        id: 42161,
        name: "Arbitrum One",
        symbol: "ETH",
        icon: "🔵",
        is_testnet: false,
        explorer_url: "https://arbiscan.io",
    },
    Network {
        id: 421614,
        name: "Arbitrum Sepolia",
        symbol: "ETH",
        icon: "🧪",
        is_testnet: true,
        explorer_url: "https://sepolia.arbiscan.io",
    },
    Network {
        id: 10,
        name: "Optimism",
        symbol: "ETH",
        icon: "🔴",
        is_testnet: false,
        explorer_url: "https://optimistic.etherscan.io",
    },
    Network {
        id: 11155420,
        name: "Optimism Sepolia",
        symbol: "ETH",
        icon: "🧪",
        is_testnet: true,
        explorer_url: "https://sepolia-optimism.etherscan.io",
    },
];

// =============================================================================
// Token Registry
// =============================================================================

const fn native(symbol: &'static str, name: &'static str, icon: &'static str) -> Token {
    Token {
        address: TokenAddress::Native,
        symbol,
        name,
        decimals: NATIVE_DECIMALS,
        icon,
    }
}

const fn erc20(
    address: alloy_primitives::Address,
    symbol: &'static str,
    name: &'static str,
    decimals: u8,
    icon: &'static str,
) -> Token {
    Token {
        address: TokenAddress::Contract(address),
        symbol,
        name,
        decimals,
        icon,
    }
}

/// Known tokens per chain id. Chains without an entry have no token list.
pub const TOKENS: &[(u64, &[Token])] = &[
    (
        1,
        &[
            native("ETH", "Ethereum", "🔷"),
            erc20(address!("dAC17F958D2ee523a2206206994597C13D831ec7"), "USDT", "Tether USD", 6, "💵"),
            erc20(address!("6B175474E89094C44Da98b954EedeAC495271d0F"), "DAI", "Dai Stablecoin", 18, "🟡"),
            erc20(address!("7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0"), "MATIC", "Polygon", 18, "🟣"),
            erc20(address!("514910771AF9Ca656af840dff83E8264EcF986CA"), "LINK", "Chainlink", 18, "🔗"),
            erc20(address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"), "UNI", "Uniswap", 18, "🦄"),
        ],
    ),
    (
        137,
        &[
            native("MATIC", "Polygon", "🟣"),
            erc20(address!("c2132D05D31c914a87C6611C10748AEb04B58e8F"), "USDT", "Tether USD", 6, "💵"),
            erc20(address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"), "DAI", "Dai Stablecoin", 18, "🟡"),
            erc20(address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"), "WMATIC", "Wrapped Matic", 18, "🟣"),
            erc20(address!("53E0bca35eC356BD5ddDFebbD1Fc0fD03FaBad39"), "LINK", "Chainlink", 18, "🔗"),
        ],
    ),
    (
        42161,
        &[
            native("ETH", "Ethereum", "🔵"),
            erc20(address!("Fd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"), "USDT", "Tether USD", 6, "💵"),
            erc20(address!("DA10009cBd5D07dd0CeCc66161FC93D7c9000da1"), "DAI", "Dai Stablecoin", 18, "🟡"),
            erc20(address!("912CE59144191C1204E64559FE8253a0e49E6548"), "ARB", "Arbitrum", 18, "🔵"),
        ],
    ),
    (
        10,
        &[
            native("ETH", "Ethereum", "🔴"),
            erc20(address!("94b008aA00579c1307B0EF2c499aD98a8ce58e58"), "USDT", "Tether USD", 6, "💵"),
            erc20(address!("DA10009cBd5D07dd0CeCc66161FC93D7c9000da1"), "DAI", "Dai Stablecoin", 18, "🟡"),
            erc20(address!("4200000000000000000000000000000000000042"), "OP", "Optimism", 18, "🔴"),
        ],
    ),
    (
        11155111,
        &[
            native("ETH", "Ethereum", "🧪"),
            erc20(address!("779877A7B0D9E8603169DdbD7836e478b4624789"), "LINK", "Chainlink Token", 18, "🔗"),
        ],
    ),
    (
        80001,
        &[
            native("MATIC", "Polygon", "🧪"),
            erc20(address!("9c3C9283D3e44854697Cd22D3Faa240Cfb032889"), "WMATIC", "Wrapped Matic", 18, "🟣"),
        ],
    ),
];

// =============================================================================
// Logging
// =============================================================================

/// Console log level: verbose in debug builds, quieter in release.
pub const LOG_LEVEL: log::LevelFilter = if cfg!(debug_assertions) {
    log::LevelFilter::Debug
} else {
    log::LevelFilter::Info
};

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_network_ids_unique() {
        let ids: HashSet<u64> = NETWORKS.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), NETWORKS.len());
    }

    #[test]
    fn test_token_chains_are_registered() {
        for (chain_id, _) in TOKENS {
            assert!(
                NETWORKS.iter().any(|n| n.id == *chain_id),
                "tokens listed for unknown chain {chain_id}"
            );
        }
    }

    #[test]
    fn test_each_token_list_has_one_native_entry() {
        for (chain_id, tokens) in TOKENS {
            let natives = tokens.iter().filter(|t| t.is_native()).count();
            assert_eq!(natives, 1, "chain {chain_id}");
        }
    }
}
