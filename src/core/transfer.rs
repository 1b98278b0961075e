//! Sending native-currency transfers through the wallet.

use alloy_primitives::TxHash;
use log::{info, warn};

use crate::core::error::TransferError;
use crate::core::provider::WalletProvider;
use crate::core::validate::build_transfer;
use crate::models::{ConnectionStatus, TransferRequest};

/// Validate `request` and hand it to the wallet for signing and broadcast.
///
/// Provider failures (user rejection, RPC errors) come back as
/// [`TransferError::TransactionFailed`] with the provider's message.
pub async fn send_native<P: WalletProvider>(
    provider: &P,
    status: &ConnectionStatus,
    request: &TransferRequest,
) -> Result<TxHash, TransferError> {
    let tx = build_transfer(status, request)?;
    info!("sending {} wei from {} to {}", tx.value, tx.from, tx.to);

    let hash = provider.send_transaction(&tx).await.map_err(|e| {
        warn!("transaction failed: {e}");
        TransferError::TransactionFailed(e.reason())
    })?;

    info!("transaction submitted: {hash}");
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Address, U256};

    use super::*;
    use crate::core::error::{ErrorKind, ValidationError};
    use crate::core::provider::mock::MockProvider;
    use crate::models::BalanceSnapshot;

    const SENDER: Address = address!("3333333333333333333333333333333333333333");
    const RECIPIENT: &str = "0x4444444444444444444444444444444444444444";

    fn connected() -> ConnectionStatus {
        ConnectionStatus::Connected {
            address: SENDER,
            chain_id: 11155111,
        }
    }

    #[tokio::test]
    async fn test_send_native_submits_transaction() {
        let provider = MockProvider::installed();
        let balance = BalanceSnapshot::new(U256::from(10u64.pow(18)), 18, "ETH");
        let request = TransferRequest::new(RECIPIENT, "0.5").with_balance(balance);

        let hash = send_native(&provider, &connected(), &request).await.unwrap();
        assert_eq!(hash, TxHash::with_last_byte(1));

        let sent = provider.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, SENDER);
        assert_eq!(sent[0].to, Address::repeat_byte(0x44));
        assert_eq!(sent[0].value, U256::from(500_000_000_000_000_000u64));
    }

    #[tokio::test]
    async fn test_send_native_validation_blocks_send() {
        let provider = MockProvider::installed();
        let request = TransferRequest::new(RECIPIENT, "0");

        let err = send_native(&provider, &connected(), &request).await.unwrap_err();
        assert_eq!(err, TransferError::Validation(ValidationError::InvalidAmount));
        assert!(provider.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_send_native_provider_failure() {
        let provider = MockProvider::installed();
        provider.fail_send.set(true);
        let request = TransferRequest::new(RECIPIENT, "0.1");

        let err = send_native(&provider, &connected(), &request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransactionFailed);
        assert_eq!(err.to_string(), "Transaction failed: insufficient funds for gas");
    }

    #[tokio::test]
    async fn test_send_native_requires_connection() {
        let provider = MockProvider::installed();
        let request = TransferRequest::new(RECIPIENT, "0.1");
        let err = send_native(&provider, &ConnectionStatus::Locked, &request)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConnected);
    }
}
