//! Token definitions and per-chain registry lookups.

use std::fmt;

use alloy_primitives::Address;

use crate::config::TOKENS;

/// Where a token's balance lives: the chain's native currency or an ERC-20 contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenAddress {
    Native,
    Contract(Address),
}

impl TokenAddress {
    /// Sentinel used in place of a contract address for native currencies.
    pub const NATIVE_SENTINEL: &'static str = "native";
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str(Self::NATIVE_SENTINEL),
            Self::Contract(address) => write!(f, "{}", address),
        }
    }
}

/// A token known to the dashboard.
///
/// `decimals` fixes the base-unit scale (`10^decimals`) for the token's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub address: TokenAddress,
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    pub icon: &'static str,
}

impl Token {
    pub fn is_native(&self) -> bool {
        matches!(self.address, TokenAddress::Native)
    }

    /// Contract address, or `None` for the native currency.
    pub fn contract(&self) -> Option<Address> {
        match self.address {
            TokenAddress::Contract(address) => Some(address),
            TokenAddress::Native => None,
        }
    }
}

/// Tokens registered for a chain (empty for chains without a list).
pub fn tokens_for_network(chain_id: u64) -> &'static [Token] {
    TOKENS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, tokens)| *tokens)
        .unwrap_or(&[])
}

/// Find a token by address on a chain.
pub fn token_by_address(chain_id: u64, address: TokenAddress) -> Option<&'static Token> {
    tokens_for_network(chain_id)
        .iter()
        .find(|token| token.address == address)
}
