//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`WalletError`] - raw EIP-1193 provider failures
//! - [`ConnectionError`] - wallet connection lifecycle errors
//! - [`ValidationError`] - rejected transfer form input
//! - [`TransferError`] - validation or send failures for a transfer
//! - [`AmountError`] - malformed decimal amounts
//!
//! Every user-facing error maps onto exactly one [`ErrorKind`].

use thiserror::Error;

/// Classification of every failure the dashboard can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoProvider,
    ConnectionRejected,
    ProviderQueryFailed,
    NotConnected,
    UnsupportedNetwork,
    MissingRecipient,
    InvalidRecipientFormat,
    MissingAmount,
    InvalidAmount,
    InsufficientBalance,
    TransactionFailed,
}

/// Wallet-related errors for MetaMask/EIP-1193 integration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// MetaMask or compatible wallet not installed
    #[error("MetaMask not installed. Please install MetaMask extension.")]
    NotInstalled,
    /// Failed to create request object
    #[error("Failed to create wallet request")]
    RequestCreationFailed,
    /// Request to wallet was rejected by user
    #[error("Wallet request rejected: {0}")]
    RequestRejected(String),
    /// No account returned from wallet
    #[error("No account returned from wallet")]
    NoAccount,
    /// Provider answered with something we could not decode
    #[error("Unexpected wallet response: {0}")]
    InvalidResponse(String),
}

impl WalletError {
    /// The provider's own message where there is one, else the display text.
    pub fn reason(&self) -> String {
        match self {
            Self::RequestRejected(msg) | Self::InvalidResponse(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors surfaced by the connection state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("No wallet found. Install a wallet extension to get started.")]
    NoProvider,
    #[error("Connection rejected: {0}")]
    ConnectionRejected(String),
    #[error("Wallet query failed: {0}")]
    ProviderQueryFailed(String),
    #[error("Unsupported network (chain id {0})")]
    UnsupportedNetwork(u64),
}

impl ConnectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoProvider => ErrorKind::NoProvider,
            Self::ConnectionRejected(_) => ErrorKind::ConnectionRejected,
            Self::ProviderQueryFailed(_) => ErrorKind::ProviderQueryFailed,
            Self::UnsupportedNetwork(_) => ErrorKind::UnsupportedNetwork,
        }
    }
}

/// Reasons a transfer form is rejected before reaching the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please connect your wallet first")]
    NotConnected,
    #[error("Please switch to a supported network (chain id {0} is not supported)")]
    UnsupportedNetwork(u64),
    #[error("Please enter a recipient address")]
    MissingRecipient,
    #[error("Please enter a valid Ethereum address")]
    InvalidRecipientFormat,
    #[error("Please enter an amount")]
    MissingAmount,
    #[error("Please enter a valid amount greater than 0")]
    InvalidAmount,
    #[error("Insufficient balance. You have {available} {symbol}")]
    InsufficientBalance { available: String, symbol: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConnected => ErrorKind::NotConnected,
            Self::UnsupportedNetwork(_) => ErrorKind::UnsupportedNetwork,
            Self::MissingRecipient => ErrorKind::MissingRecipient,
            Self::InvalidRecipientFormat => ErrorKind::InvalidRecipientFormat,
            Self::MissingAmount => ErrorKind::MissingAmount,
            Self::InvalidAmount => ErrorKind::InvalidAmount,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
        }
    }
}

/// Failure to send a native transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(e) => e.kind(),
            Self::TransactionFailed(_) => ErrorKind::TransactionFailed,
        }
    }
}

/// Decimal amount parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is negative")]
    Negative,
    #[error("not a decimal number: {0}")]
    Malformed(String),
    #[error("amount exponent out of range")]
    OutOfRange,
    #[error("more than {decimals} fractional digits")]
    ExcessPrecision { decimals: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message() {
        let err = ValidationError::InsufficientBalance {
            available: "0.500000".to_string(),
            symbol: "ETH".to_string(),
        };
        assert_eq!(err.to_string(), "Insufficient balance. You have 0.500000 ETH");
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
    }

    #[test]
    fn test_transfer_error_kind_follows_validation() {
        let err = TransferError::from(ValidationError::MissingAmount);
        assert_eq!(err.kind(), ErrorKind::MissingAmount);
        assert_eq!(err.to_string(), "Please enter an amount");

        let failed = TransferError::TransactionFailed("user denied".to_string());
        assert_eq!(failed.kind(), ErrorKind::TransactionFailed);
    }

    #[test]
    fn test_connection_error_kinds() {
        assert_eq!(ConnectionError::NoProvider.kind(), ErrorKind::NoProvider);
        assert_eq!(
            ConnectionError::ConnectionRejected("denied".into()).kind(),
            ErrorKind::ConnectionRejected
        );
        assert_eq!(
            ConnectionError::UnsupportedNetwork(5).to_string(),
            "Unsupported network (chain id 5)"
        );
    }
}
