//! The outbound form handed to the transport layer.
//!
//! [`SignedRequestFields`] is the complete set of `name = value` pairs the
//! browser POSTs to the gateway's redirect endpoint, in the gateway's
//! documented order, with the signature last. It is built fresh on every
//! call and contains no secret material, so it is safe to log, render, or
//! serialize.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::builder::TransactionRequest;
use super::signing::compute_signature;
use crate::config::request_fields as field;
use crate::crypto::TransactionSecret;

/// Ordered gateway form fields, signature included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequestFields {
    fields: Vec<(&'static str, String)>,
}

impl SignedRequestFields {
    /// Looks up a field by its gateway name, e.g. `"PurchaseAmt"`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `Signature` field.
    pub fn signature(&self) -> &str {
        self.get(field::SIGNATURE).unwrap_or_default()
    }

    /// Iterates `(name, value)` pairs in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the set into owned pairs, e.g. for a form encoder.
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.fields
    }
}

impl Serialize for SignedRequestFields {
    /// Serializes as a map whose key order is the submission order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Builds and signs the gateway form for a request.
///
/// Field order: `Version`, `MerID`, `AcqID`, `MerRespURL`,
/// `PurchaseCurrency`, `PurchaseCurrencyExponent`, `OrderID`,
/// `SignatureMethod`, `PurchaseAmt`, `Url`, `Signature`.
pub fn sign_request(request: &TransactionRequest, secret: &TransactionSecret) -> SignedRequestFields {
    let merchant = request.merchant();
    let signature = compute_signature(request, secret);

    SignedRequestFields {
        fields: vec![
            (field::VERSION, merchant.version().to_string()),
            (field::MERCHANT_ID, merchant.merchant_id().to_string()),
            (field::ACQUIRER_ID, merchant.acquirer_id().to_string()),
            (field::RETURN_URL, merchant.return_url().to_string()),
            (field::PURCHASE_CURRENCY, merchant.currency().to_string()),
            (
                field::PURCHASE_CURRENCY_EXPONENT,
                merchant.currency_exponent().to_string(),
            ),
            (field::ORDER_ID, request.order_id().to_string()),
            (field::SIGNATURE_METHOD, merchant.signature_method().to_string()),
            (field::PURCHASE_AMOUNT, request.canonical_amount().to_string()),
            (field::GATEWAY_URL, merchant.gateway_url().to_string()),
            (field::SIGNATURE, signature),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MerchantConfig, DEFAULT_GATEWAY_URL};
    use rust_decimal::Decimal;

    fn signed() -> SignedRequestFields {
        let merchant = MerchantConfig::builder()
            .acquirer_id("A1")
            .merchant_id("M1")
            .return_url("https://shop.example.mv/return")
            .build()
            .unwrap();
        let request = TransactionRequest::builder(merchant)
            .order_id("ORD100")
            .amount(Decimal::new(1255, 1))
            .build()
            .unwrap();
        sign_request(&request, &TransactionSecret::new("s3cret").unwrap())
    }

    #[test]
    fn fields_are_in_gateway_order() {
        let names: Vec<_> = signed().iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            [
                "Version",
                "MerID",
                "AcqID",
                "MerRespURL",
                "PurchaseCurrency",
                "PurchaseCurrencyExponent",
                "OrderID",
                "SignatureMethod",
                "PurchaseAmt",
                "Url",
                "Signature",
            ]
        );
    }

    #[test]
    fn field_values() {
        let form = signed();
        assert_eq!(form.len(), 11);
        assert_eq!(form.get("Version"), Some("1.0.0"));
        assert_eq!(form.get("MerID"), Some("M1"));
        assert_eq!(form.get("AcqID"), Some("A1"));
        assert_eq!(form.get("MerRespURL"), Some("https://shop.example.mv/return"));
        assert_eq!(form.get("PurchaseCurrency"), Some("462"));
        assert_eq!(form.get("PurchaseCurrencyExponent"), Some("2"));
        assert_eq!(form.get("OrderID"), Some("ORD100"));
        assert_eq!(form.get("SignatureMethod"), Some("SHA1"));
        assert_eq!(form.get("PurchaseAmt"), Some("000000012550"));
        assert_eq!(form.get("Url"), Some(DEFAULT_GATEWAY_URL));
        assert_eq!(form.signature(), "qJkK9KIiL6Lvw7UAFmBZMz+1UR8=");
        assert_eq!(form.get("Nope"), None);
    }

    #[test]
    fn form_never_contains_the_secret() {
        let form = signed();
        assert!(form.iter().all(|(_, value)| !value.contains("s3cret")));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let json = serde_json::to_string(&signed()).unwrap();
        assert!(json.starts_with(r#"{"Version":"1.0.0","MerID":"M1""#));
        assert!(json.ends_with(r#""Signature":"qJkK9KIiL6Lvw7UAFmBZMz+1UR8="}"#));
    }

    #[test]
    fn into_pairs_keeps_order() {
        let pairs = signed().into_pairs();
        assert_eq!(pairs.first().map(|(k, _)| *k), Some("Version"));
        assert_eq!(pairs.last().map(|(k, _)| *k), Some("Signature"));
    }
}
