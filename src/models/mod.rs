//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Network`] - Statically registered blockchain networks
//! - [`Token`], [`TokenAddress`] - Native and ERC-20 tokens per chain
//! - [`ConnectionStatus`] - Web3 wallet connection state
//! - [`TransferRequest`], [`TransactionRequest`] - Native transfer input and output

mod network;
mod token;
mod transfer;
mod wallet;

pub use network::{explorer_tx_url, network_name, network_symbol, Network};
pub use token::{token_by_address, tokens_for_network, Token, TokenAddress};
pub use transfer::{BalanceSnapshot, TransactionRequest, TransferRequest};
pub use wallet::ConnectionStatus;
