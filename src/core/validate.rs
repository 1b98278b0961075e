//! Transfer form validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//! session, network, recipient, amount, balance.

use std::str::FromStr;
use std::sync::LazyLock;

use alloy_primitives::Address;
use regex::Regex;

use crate::config::{BALANCE_DISPLAY_PLACES, NATIVE_DECIMALS};
use crate::core::amount::{biguint_to_u256, format_fixed, parse_decimal_units, DecimalAmount};
use crate::core::error::ValidationError;
use crate::models::{ConnectionStatus, Network, TransactionRequest, TransferRequest};

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address pattern is valid"));

/// Whether `s` is `0x` followed by exactly 40 hex digits (any case).
pub fn is_valid_address(s: &str) -> bool {
    ADDRESS_PATTERN.is_match(s)
}

/// Fields of a request that passed every check.
struct Checked<'a> {
    from: Address,
    to: Address,
    amount: &'a str,
}

fn check<'a>(
    status: &ConnectionStatus,
    request: &'a TransferRequest,
) -> Result<Checked<'a>, ValidationError> {
    let ConnectionStatus::Connected { address, chain_id } = status else {
        return Err(ValidationError::NotConnected);
    };

    if !Network::is_supported(*chain_id) {
        return Err(ValidationError::UnsupportedNetwork(*chain_id));
    }

    let recipient = request.recipient.trim();
    if recipient.is_empty() {
        return Err(ValidationError::MissingRecipient);
    }
    if !is_valid_address(recipient) {
        return Err(ValidationError::InvalidRecipientFormat);
    }
    let to = Address::from_str(recipient).map_err(|_| ValidationError::InvalidRecipientFormat)?;

    let amount_text = request.amount.trim();
    if amount_text.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    let numeric: f64 = amount_text.parse().map_err(|_| ValidationError::InvalidAmount)?;
    if !numeric.is_finite() || numeric <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    let amount: DecimalAmount = amount_text
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if amount.is_zero() {
        return Err(ValidationError::InvalidAmount);
    }

    if let Some(balance) = &request.balance {
        let available = DecimalAmount::from_base_units(&balance.raw, balance.decimals);
        if amount > available {
            return Err(ValidationError::InsufficientBalance {
                available: format_fixed(&balance.raw, balance.decimals, BALANCE_DISPLAY_PLACES),
                symbol: balance.symbol.clone(),
            });
        }
    }

    Ok(Checked {
        from: *address,
        to,
        amount: amount_text,
    })
}

/// Validate a native transfer request against the current session.
pub fn validate_transfer_request(
    status: &ConnectionStatus,
    request: &TransferRequest,
) -> Result<(), ValidationError> {
    check(status, request).map(|_| ())
}

/// Validate and convert a request into a wallet-ready transaction.
///
/// The amount is scaled to wei. Amounts finer than one wei, or too large
/// for a `uint256`, are rejected as [`ValidationError::InvalidAmount`].
pub fn build_transfer(
    status: &ConnectionStatus,
    request: &TransferRequest,
) -> Result<TransactionRequest, ValidationError> {
    let checked = check(status, request)?;
    let wei = parse_decimal_units(checked.amount, NATIVE_DECIMALS)
        .map_err(|_| ValidationError::InvalidAmount)?;
    let value = biguint_to_u256(&wei).ok_or(ValidationError::InvalidAmount)?;

    Ok(TransactionRequest {
        from: checked.from,
        to: checked.to,
        value,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, U256};

    use super::*;
    use crate::core::error::ErrorKind;
    use crate::models::BalanceSnapshot;

    const SENDER: Address = address!("1111111111111111111111111111111111111111");

    fn connected(chain_id: u64) -> ConnectionStatus {
        ConnectionStatus::Connected {
            address: SENDER,
            chain_id,
        }
    }

    fn recipient() -> String {
        format!("0x{}", "a".repeat(40))
    }

    fn one_eth() -> BalanceSnapshot {
        BalanceSnapshot::new(U256::from(1_000_000_000_000_000_000u64), 18, "ETH")
    }

    fn kind_of(status: &ConnectionStatus, request: &TransferRequest) -> Option<ErrorKind> {
        validate_transfer_request(status, request)
            .err()
            .map(|e| e.kind())
    }

    #[test]
    fn test_address_pattern() {
        assert!(is_valid_address(&recipient()));
        assert!(is_valid_address("0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!is_valid_address("0x123"));
        assert!(!is_valid_address("dAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!is_valid_address(&format!("0x{}", "g".repeat(40))));
        assert!(!is_valid_address(&format!("0x{}", "a".repeat(41))));
    }

    #[test]
    fn test_not_connected_comes_first() {
        let request = TransferRequest::new("", "");
        for status in [
            ConnectionStatus::Checking,
            ConnectionStatus::NoProvider,
            ConnectionStatus::Locked,
            ConnectionStatus::Unlocked,
        ] {
            assert_eq!(kind_of(&status, &request), Some(ErrorKind::NotConnected));
        }
    }

    #[test]
    fn test_unsupported_network_before_recipient() {
        let request = TransferRequest::new("0x123", "1");
        assert_eq!(
            validate_transfer_request(&connected(56), &request),
            Err(ValidationError::UnsupportedNetwork(56))
        );
    }

    #[test]
    fn test_recipient_checks() {
        let status = connected(1);
        assert_eq!(
            kind_of(&status, &TransferRequest::new("   ", "1")),
            Some(ErrorKind::MissingRecipient)
        );
        assert_eq!(
            kind_of(&status, &TransferRequest::new("0x123", "1")),
            Some(ErrorKind::InvalidRecipientFormat)
        );
        assert_eq!(kind_of(&status, &TransferRequest::new(recipient(), "1")), None);
        // surrounding whitespace is trimmed
        let padded = format!("  {}  ", recipient());
        assert_eq!(kind_of(&status, &TransferRequest::new(padded, "1")), None);
    }

    #[test]
    fn test_amount_checks() {
        let status = connected(1);
        let cases = [
            ("", ErrorKind::MissingAmount),
            ("  ", ErrorKind::MissingAmount),
            ("0", ErrorKind::InvalidAmount),
            ("0.000", ErrorKind::InvalidAmount),
            ("-1", ErrorKind::InvalidAmount),
            ("abc", ErrorKind::InvalidAmount),
            ("inf", ErrorKind::InvalidAmount),
            ("NaN", ErrorKind::InvalidAmount),
            ("1e999", ErrorKind::InvalidAmount),
        ];
        for (amount, expected) in cases {
            let request = TransferRequest::new(recipient(), amount);
            assert_eq!(kind_of(&status, &request), Some(expected), "amount={amount:?}");
        }
    }

    #[test]
    fn test_insufficient_balance_message() {
        let balance = BalanceSnapshot::new(U256::from(1_234_567_890_000_000_000u64), 18, "ETH");
        let request = TransferRequest::new(recipient(), "2").with_balance(balance);

        let err = validate_transfer_request(&connected(1), &request).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientBalance {
                available: "1.234568".to_string(),
                symbol: "ETH".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Insufficient balance. You have 1.234568 ETH");
    }

    #[test]
    fn test_exact_balance_is_allowed() {
        let request = TransferRequest::new(recipient(), "1.0").with_balance(one_eth());
        assert_eq!(validate_transfer_request(&connected(1), &request), Ok(()));

        let over = TransferRequest::new(recipient(), "1.000000000000000001").with_balance(one_eth());
        assert_eq!(kind_of(&connected(1), &over), Some(ErrorKind::InsufficientBalance));
    }

    #[test]
    fn test_missing_balance_skips_check() {
        let request = TransferRequest::new(recipient(), "1000000");
        assert_eq!(validate_transfer_request(&connected(137), &request), Ok(()));
    }

    #[test]
    fn test_build_transfer() {
        let request = TransferRequest::new(recipient(), "0.25").with_balance(one_eth());
        let tx = build_transfer(&connected(10), &request).unwrap();
        assert_eq!(tx.from, SENDER);
        assert_eq!(tx.to, Address::repeat_byte(0xaa));
        assert_eq!(tx.value, U256::from(250_000_000_000_000_000u64));
    }

    #[test]
    fn test_build_transfer_rejects_sub_wei_amount() {
        let request = TransferRequest::new(recipient(), "0.0000000000000000001");
        assert_eq!(
            build_transfer(&connected(1), &request),
            Err(ValidationError::InvalidAmount)
        );
    }

    #[test]
    fn test_build_transfer_propagates_validation() {
        let request = TransferRequest::new("0x123", "1");
        assert_eq!(
            build_transfer(&connected(1), &request),
            Err(ValidationError::InvalidRecipientFormat)
        );
    }
}
