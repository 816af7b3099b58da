//! # Amount Canonicalization
//!
//! The gateway carries the purchase amount as `PurchaseAmt`: the amount in
//! minor units, as plain decimal digits, left-padded with `'0'` to exactly
//! [`AMOUNT_FIELD_WIDTH`] characters. `125.50` MVR is `"000000012550"`.
//!
//! The same string is concatenated into the signature. Because the signing
//! payload has no delimiters, the amount's fixed width is what keeps it from
//! bleeding into the order id before it and the currency code after it. A
//! canonical amount therefore has to be exact: no separators, no sign, no
//! truncation. An amount that does not fit is an error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

use crate::config::{AMOUNT_FIELD_WIDTH, MAX_CURRENCY_EXPONENT};
use crate::error::GatewayError;

/// Largest minor-unit value that fits in the field: twelve nines.
const MAX_MINOR_UNITS: u64 = 999_999_999_999;

/// A purchase amount in its wire form.
///
/// Only [`canonicalize_amount`] produces one, so an existing
/// `CanonicalAmount` always holds exactly [`AMOUNT_FIELD_WIDTH`] digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CanonicalAmount {
    digits: String,
    minor_units: u64,
}

impl CanonicalAmount {
    /// The zero-padded digit string sent as `PurchaseAmt`.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn minor_units(&self) -> u64 {
        self.minor_units
    }

    /// Converts back to major units for the given exponent.
    pub fn to_major_units(&self, exponent: u8) -> Decimal {
        // minor_units <= 999_999_999_999 always fits an i64.
        Decimal::new(self.minor_units as i64, u32::from(exponent))
    }
}

impl fmt::Display for CanonicalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl From<CanonicalAmount> for String {
    fn from(amount: CanonicalAmount) -> Self {
        amount.digits
    }
}

/// Converts a major-unit amount into the gateway's fixed-width minor units.
///
/// 1. Multiply by `10^exponent`.
/// 2. Round to an integer, half away from zero (`2.005` at exponent 2 is `201`).
/// 3. Render the digits and left-pad with `'0'` to [`AMOUNT_FIELD_WIDTH`].
///
/// # Errors
///
/// - [`GatewayError::NegativeAmount`] for amounts below zero.
/// - [`GatewayError::InvalidField`] for an exponent above
///   [`MAX_CURRENCY_EXPONENT`].
/// - [`GatewayError::AmountOverflow`] when the minor-unit value needs more
///   than [`AMOUNT_FIELD_WIDTH`] digits.
///
/// # Example
///
/// ```
/// use mpg_protocol::amount::canonicalize_amount;
/// use rust_decimal::Decimal;
///
/// let amount = canonicalize_amount(Decimal::new(1255, 1), 2).unwrap();
/// assert_eq!(amount.as_str(), "000000012550");
/// ```
pub fn canonicalize_amount(amount: Decimal, exponent: u8) -> Result<CanonicalAmount, GatewayError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(GatewayError::NegativeAmount(amount.to_string()));
    }
    if exponent > MAX_CURRENCY_EXPONENT {
        return Err(GatewayError::invalid(
            "PurchaseCurrencyExponent",
            format!("{} exceeds the maximum of {}", exponent, MAX_CURRENCY_EXPONENT),
        ));
    }

    let overflow = |digits: usize| GatewayError::AmountOverflow {
        amount: amount.to_string(),
        digits,
        width: AMOUNT_FIELD_WIDTH,
    };

    let scale = Decimal::from(10u64.pow(u32::from(exponent)));
    let minor = amount
        .checked_mul(scale)
        .ok_or_else(|| overflow(amount.trunc().abs().to_string().len() + usize::from(exponent)))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let minor_units = match minor.abs().to_u64() {
        Some(units) => units,
        None => return Err(overflow(minor.trunc().abs().to_string().len())),
    };
    if minor_units > MAX_MINOR_UNITS {
        return Err(overflow(minor_units.to_string().len()));
    }

    Ok(CanonicalAmount {
        digits: format!("{:0width$}", minor_units, width = AMOUNT_FIELD_WIDTH),
        minor_units,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn reference_example() {
        let amount = canonicalize_amount(dec("125.5"), 2).unwrap();
        assert_eq!(amount.as_str(), "000000012550");
        assert_eq!(amount.minor_units(), 12_550);
    }

    #[test]
    fn whole_amounts_and_zero() {
        assert_eq!(canonicalize_amount(dec("125"), 2).unwrap().as_str(), "000000012500");
        assert_eq!(canonicalize_amount(dec("0"), 2).unwrap().as_str(), "000000000000");
        assert_eq!(canonicalize_amount(dec("-0"), 2).unwrap().as_str(), "000000000000");
    }

    #[test]
    fn exponent_zero_and_three() {
        assert_eq!(canonicalize_amount(dec("1500"), 0).unwrap().as_str(), "000000001500");
        assert_eq!(canonicalize_amount(dec("1.234"), 3).unwrap().as_str(), "000000001234");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(canonicalize_amount(dec("2.005"), 2).unwrap().minor_units(), 201);
        assert_eq!(canonicalize_amount(dec("2.015"), 2).unwrap().minor_units(), 202);
        assert_eq!(canonicalize_amount(dec("2.0049"), 2).unwrap().minor_units(), 200);
        assert_eq!(canonicalize_amount(dec("0.5"), 0).unwrap().minor_units(), 1);
    }

    #[test]
    fn largest_amount_fills_the_field() {
        let amount = canonicalize_amount(dec("9999999999.99"), 2).unwrap();
        assert_eq!(amount.as_str(), "999999999999");
    }

    #[test]
    fn overflow_is_an_error_not_truncation() {
        let err = canonicalize_amount(dec("10000000000"), 2).unwrap_err();
        assert_eq!(
            err,
            GatewayError::AmountOverflow {
                amount: "10000000000".into(),
                digits: 13,
                width: AMOUNT_FIELD_WIDTH,
            }
        );
    }

    #[test]
    fn rounding_up_into_overflow_is_caught() {
        let err = canonicalize_amount(dec("9999999999.995"), 2).unwrap_err();
        assert!(matches!(err, GatewayError::AmountOverflow { digits: 13, .. }));
    }

    #[test]
    fn huge_decimal_overflows_cleanly() {
        let err = canonicalize_amount(Decimal::MAX, 4).unwrap_err();
        assert!(matches!(err, GatewayError::AmountOverflow { .. }));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = canonicalize_amount(dec("-1.00"), 2).unwrap_err();
        assert_eq!(err, GatewayError::NegativeAmount("-1.00".into()));
    }

    #[test]
    fn exponent_above_iso_maximum_is_rejected() {
        assert!(matches!(
            canonicalize_amount(dec("1"), 5),
            Err(GatewayError::InvalidField { .. })
        ));
    }

    #[test]
    fn converts_back_to_major_units() {
        let amount = canonicalize_amount(dec("125.5"), 2).unwrap();
        assert_eq!(amount.to_major_units(2), dec("125.50"));
        assert_eq!(amount.to_string(), "000000012550");
    }
}
