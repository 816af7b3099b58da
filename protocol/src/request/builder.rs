//! Transaction request construction via the builder pattern.
//!
//! A [`TransactionRequest`] is one order ready to be signed: the merchant's
//! [`MerchantConfig`] plus an order id and an amount. The builder validates
//! both and canonicalizes the amount up front, so a request that exists can
//! always be signed. Amount overflow surfaces here, before any signature is
//! computed.
//!
//! The request never holds the transaction secret. Signing borrows it; see
//! [`super::signing`].

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::amount::{canonicalize_amount, CanonicalAmount};
use crate::config::{check_identifier, MerchantConfig, MAX_ORDER_ID_LENGTH};
use crate::error::GatewayError;

/// Punctuation allowed in order ids on top of ASCII alphanumerics.
const ORDER_ID_PUNCTUATION: &[char] = &['-', '_'];

// ---------------------------------------------------------------------------
// TransactionRequest
// ---------------------------------------------------------------------------

/// A finalized, immutable payment request.
///
/// # Signed fields
///
/// [`super::signing`] concatenates, in this order and without delimiters:
/// secret, merchant id, acquirer id, order id, canonical amount, currency.
/// Each of those has a fixed character set enforced at construction (see
/// [`crate::config`]), and the amount and currency have fixed widths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    merchant: MerchantConfig,
    order_id: String,
    amount: Decimal,
    canonical_amount: CanonicalAmount,
}

impl TransactionRequest {
    /// Starts a builder for an order under the given merchant.
    pub fn builder(merchant: MerchantConfig) -> TransactionRequestBuilder {
        TransactionRequestBuilder::new(merchant)
    }

    pub fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// The amount in major units as the caller supplied it.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The amount in its `PurchaseAmt` form.
    pub fn canonical_amount(&self) -> &CanonicalAmount {
        &self.canonical_amount
    }
}

// ---------------------------------------------------------------------------
// TransactionRequestBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`TransactionRequest`].
///
/// ```
/// use mpg_protocol::config::MerchantConfig;
/// use mpg_protocol::request::TransactionRequest;
/// use rust_decimal::Decimal;
///
/// let merchant = MerchantConfig::builder()
///     .acquirer_id("A1")
///     .merchant_id("M1")
///     .return_url("https://shop.example.mv/return")
///     .build()
///     .unwrap();
///
/// let request = TransactionRequest::builder(merchant)
///     .order_id("ORD100")
///     .amount(Decimal::new(1255, 1))
///     .build()
///     .unwrap();
/// assert_eq!(request.canonical_amount().as_str(), "000000012550");
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRequestBuilder {
    merchant: MerchantConfig,
    order_id: Option<String>,
    amount: Option<Decimal>,
}

impl TransactionRequestBuilder {
    pub fn new(merchant: MerchantConfig) -> Self {
        Self {
            merchant,
            order_id: None,
            amount: None,
        }
    }

    /// Sets the caller-assigned order id.
    pub fn order_id(mut self, order_id: &str) -> Self {
        self.order_id = Some(order_id.to_string());
        self
    }

    /// Assigns a fresh order id: a UUIDv4 in its 32-hex-digit simple form.
    ///
    /// For callers without their own order numbering. The id has to be
    /// persisted by the caller to match the gateway's callback later.
    pub fn generated_order_id(mut self) -> Self {
        self.order_id = Some(Uuid::new_v4().simple().to_string());
        self
    }

    /// Sets the amount in major units (e.g. `125.50` for MVR 125.50).
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Validates the order id, canonicalizes the amount, and freezes the request.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::MissingField`] if order id or amount was never set.
    /// - [`GatewayError::InvalidField`] for an order id outside its encoding.
    /// - [`GatewayError::NegativeAmount`] / [`GatewayError::AmountOverflow`]
    ///   from canonicalization.
    pub fn build(self) -> Result<TransactionRequest, GatewayError> {
        let order_id = self.order_id.ok_or(GatewayError::MissingField("OrderID"))?;
        let amount = self.amount.ok_or(GatewayError::MissingField("PurchaseAmt"))?;

        check_identifier("OrderID", &order_id, MAX_ORDER_ID_LENGTH, ORDER_ID_PUNCTUATION)?;
        let canonical_amount = canonicalize_amount(amount, self.merchant.currency_exponent())?;

        Ok(TransactionRequest {
            merchant: self.merchant,
            order_id,
            amount,
            canonical_amount,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::types::CurrencyCode;
    use std::str::FromStr;

    fn merchant() -> MerchantConfig {
        MerchantConfig::builder()
            .acquirer_id("A1")
            .merchant_id("M1")
            .return_url("https://shop.example.mv/return")
            .build()
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn build_canonicalizes_amount_with_merchant_exponent() {
        let request = TransactionRequest::builder(merchant())
            .order_id("ORD100")
            .amount(dec("125.5"))
            .build()
            .unwrap();
        assert_eq!(request.order_id(), "ORD100");
        assert_eq!(request.amount(), dec("125.5"));
        assert_eq!(request.canonical_amount().as_str(), "000000012550");
    }

    #[test]
    fn exponent_follows_currency() {
        let yen = MerchantConfig::builder()
            .acquirer_id("A1")
            .merchant_id("M1")
            .return_url("https://shop.example.mv/return")
            .currency(CurrencyCode::JPY)
            .currency_exponent(0)
            .build()
            .unwrap();
        let request = TransactionRequest::builder(yen)
            .order_id("ORD1")
            .amount(dec("1500"))
            .build()
            .unwrap();
        assert_eq!(request.canonical_amount().as_str(), "000000001500");
    }

    #[test]
    fn missing_fields_are_named() {
        let err = TransactionRequest::builder(merchant())
            .amount(dec("1"))
            .build()
            .unwrap_err();
        assert_eq!(err, GatewayError::MissingField("OrderID"));

        let err = TransactionRequest::builder(merchant())
            .order_id("ORD1")
            .build()
            .unwrap_err();
        assert_eq!(err, GatewayError::MissingField("PurchaseAmt"));
    }

    #[test]
    fn order_id_character_set_is_enforced() {
        assert!(TransactionRequest::builder(merchant())
            .order_id("INV-2024_0001")
            .amount(dec("1"))
            .build()
            .is_ok());

        for bad in ["", "ORD 1", "ORD|1", "ORD\u{e9}1"] {
            let err = TransactionRequest::builder(merchant())
                .order_id(bad)
                .amount(dec("1"))
                .build()
                .unwrap_err();
            assert!(
                matches!(err, GatewayError::InvalidField { field: "OrderID", .. }),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn overflowing_amount_fails_at_build() {
        let err = TransactionRequest::builder(merchant())
            .order_id("ORD1")
            .amount(dec("10000000000"))
            .build()
            .unwrap_err();
        assert!(matches!(err, GatewayError::AmountOverflow { .. }));
    }

    #[test]
    fn generated_order_ids_are_unique_and_valid() {
        let a = TransactionRequest::builder(merchant())
            .generated_order_id()
            .amount(dec("1"))
            .build()
            .unwrap();
        let b = TransactionRequest::builder(merchant())
            .generated_order_id()
            .amount(dec("1"))
            .build()
            .unwrap();
        assert_eq!(a.order_id().len(), 32);
        assert_ne!(a.order_id(), b.order_id());
    }

    #[test]
    fn serialized_request_has_no_secret_field() {
        let request = TransactionRequest::builder(merchant())
            .order_id("ORD100")
            .amount(dec("125.5"))
            .build()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["orderId"], "ORD100");
        assert_eq!(json["amount"], "125.5");
        assert_eq!(json["canonicalAmount"], "000000012550");
        assert!(!json.to_string().to_lowercase().contains("secret"));
    }
}
