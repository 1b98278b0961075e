//! Fixed-point conversion between integer base units and decimal strings.
//!
//! Amounts on chain are integers in the token's smallest unit (wei for ETH).
//! Display values are `base_units / 10^decimals`. All arithmetic here is
//! arbitrary precision, so values past `2^256` convert without loss.

use std::cmp::Ordering;
use std::str::FromStr;

use alloy_primitives::U256;
use num_bigint::BigUint;

use crate::core::error::AmountError;

/// Largest decimal exponent accepted when parsing user input.
///
/// Anything beyond this is far outside any token supply and would only
/// force huge allocations when rescaling.
const MAX_EXPONENT: i64 = 4096;

/// `10^exp` as an arbitrary-precision integer.
fn ten_pow(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Convert a provider-native `U256` into a `BigUint`.
pub fn u256_to_biguint(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes::<32>())
}

/// Convert a `BigUint` back into `U256`, failing if it does not fit.
pub fn biguint_to_u256(value: &BigUint) -> Option<U256> {
    U256::try_from_be_slice(&value.to_bytes_be())
}

/// Format an integer amount of base units as a human decimal string.
///
/// Trailing fractional zeros are stripped, and a zero fraction drops the
/// decimal point entirely:
///
/// ```ignore
/// format_base_units(&1_500_000_000_000_000_000u64.into(), 18) == "1.5"
/// format_base_units(&1_000_000u64.into(), 6) == "1"
/// ```
pub fn format_base_units(raw: &BigUint, decimals: u8) -> String {
    let scale = ten_pow(decimals.into());
    let whole = raw / &scale;
    let fraction = raw % &scale;

    if fraction == BigUint::ZERO {
        return whole.to_string();
    }

    let padded = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}

/// Like [`format_base_units`], but an absent amount renders as `"0"`.
pub fn format_optional_base_units(raw: Option<&BigUint>, decimals: u8) -> String {
    raw.map(|value| format_base_units(value, decimals))
        .unwrap_or_else(|| "0".to_string())
}

/// Format an amount with exactly `places` fractional digits, rounding half up.
pub fn format_fixed(raw: &BigUint, decimals: u8, places: u8) -> String {
    let divisor = ten_pow(decimals.into());
    let scaled = raw * ten_pow(places.into());
    let rounded = (scaled + (&divisor >> 1u32)) / &divisor;

    if places == 0 {
        return rounded.to_string();
    }

    let unit = ten_pow(places.into());
    let whole = &rounded / &unit;
    let fraction = &rounded % &unit;
    format!(
        "{}.{:0>width$}",
        whole,
        fraction.to_string(),
        width = places as usize
    )
}

/// Parse a decimal string into base units (the inverse of [`format_base_units`]).
///
/// Input with more fractional digits than `decimals` can represent is
/// rejected rather than silently truncated.
pub fn parse_decimal_units(text: &str, decimals: u8) -> Result<BigUint, AmountError> {
    text.trim().parse::<DecimalAmount>()?.to_base_units(decimals)
}

// =============================================================================
// DecimalAmount
// =============================================================================

/// An exact non-negative decimal number: `mantissa * 10^exponent`.
///
/// Accepts the plain and scientific notations a number input can produce
/// (`"1"`, `"0.25"`, `".5"`, `"3."`, `"1e-3"`, `"+2.5E2"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalAmount {
    mantissa: BigUint,
    exponent: i64,
}

impl DecimalAmount {
    /// The exact value `raw / 10^decimals`, numerically equal to
    /// `format_base_units(raw, decimals)`.
    pub fn from_base_units(raw: &BigUint, decimals: u8) -> Self {
        Self {
            mantissa: raw.clone(),
            exponent: -i64::from(decimals),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == BigUint::ZERO
    }

    /// Rescale to integer base units of a token with `decimals` places.
    pub fn to_base_units(&self, decimals: u8) -> Result<BigUint, AmountError> {
        let shift = self.exponent + i64::from(decimals);
        if shift >= 0 {
            return Ok(&self.mantissa * ten_pow(shift as u32));
        }

        let divisor = ten_pow(shift.unsigned_abs() as u32);
        if &self.mantissa % &divisor != BigUint::ZERO {
            return Err(AmountError::ExcessPrecision { decimals });
        }
        Ok(&self.mantissa / divisor)
    }
}

impl FromStr for DecimalAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let unsigned = match s.as_bytes()[0] {
            b'-' => return Err(AmountError::Negative),
            b'+' => &s[1..],
            _ => s,
        };

        let (number, exp_part) = match unsigned.find(['e', 'E']) {
            Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
            None => (unsigned, None),
        };

        let (int_digits, frac_digits) = number.split_once('.').unwrap_or((number, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(AmountError::Malformed(s.to_string()));
        }
        if !all_digits(int_digits) || !all_digits(frac_digits) {
            return Err(AmountError::Malformed(s.to_string()));
        }

        let exp_value = match exp_part {
            Some(exp) => exp
                .parse::<i64>()
                .map_err(|_| AmountError::Malformed(s.to_string()))?,
            None => 0,
        };

        let exponent = exp_value.saturating_sub(frac_digits.len() as i64);
        if exponent.unsigned_abs() > MAX_EXPONENT as u64 {
            return Err(AmountError::OutOfRange);
        }

        let digits = format!("{int_digits}{frac_digits}");
        let mantissa = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| AmountError::Malformed(s.to_string()))?;

        Ok(Self { mantissa, exponent })
    }
}

impl Ord for DecimalAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        let base = self.exponent.min(other.exponent);
        let lhs = &self.mantissa * ten_pow((self.exponent - base) as u32);
        let rhs = &other.mantissa * ten_pow((other.exponent - base) as u32);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for DecimalAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
