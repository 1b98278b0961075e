//! Transfer form input and the wallet-ready transaction it becomes.

use alloy_primitives::{Address, U256};
use num_bigint::BigUint;

use crate::core::amount::u256_to_biguint;

/// A balance as last read from the chain, kept alongside its unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub raw: BigUint,
    pub decimals: u8,
    pub symbol: String,
}

impl BalanceSnapshot {
    pub fn new(raw: U256, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            raw: u256_to_biguint(raw),
            decimals,
            symbol: symbol.into(),
        }
    }
}

/// User input for a native transfer, captured on submit.
///
/// `balance` is `None` while the balance is still loading; the
/// sufficiency check is skipped in that case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient: String,
    pub amount: String,
    pub balance: Option<BalanceSnapshot>,
}

impl TransferRequest {
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
            balance: None,
        }
    }

    pub fn with_balance(mut self, balance: BalanceSnapshot) -> Self {
        self.balance = Some(balance);
        self
    }
}

/// A validated native transfer, ready for `eth_sendTransaction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
}
