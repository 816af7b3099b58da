//! Interpretation of the gateway's return callback.
//!
//! After payment the gateway sends the cardholder back to `MerRespURL` with
//! a set of form fields. Those fields are untrusted input. This module checks
//! their shape and turns them into a [`NormalizedResult`]. Checking the
//! callback's `Signature` is a separate, explicit step
//! ([`NormalizedResult::verify_signature`]) because the gateway does not sign
//! every callback consistently.
//!
//! The callback `Signature` is the request signature: it covers the order,
//! the amount and the currency, never `ResponseCode` or `ReasonCode`. It is
//! also in the form the cardholder's browser posts, so anyone who saw that
//! form can attach it to a callback with any outcome. A valid signature ties
//! a callback to one of this merchant's orders; it does not prove the
//! outcome. Confirm the outcome with the acquirer before releasing goods.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::codes::{classify, Outcome};
use crate::config::response_fields as field;
use crate::crypto::TransactionSecret;
use crate::error::GatewayError;
use crate::request::signing::{verify_signature, SignatureCheck};
use crate::request::TransactionRequest;

// ---------------------------------------------------------------------------
// GatewayResponse
// ---------------------------------------------------------------------------

/// Raw callback fields, keyed by the gateway's field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayResponse {
    fields: HashMap<String, String>,
}

impl GatewayResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Adds or replaces a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<HashMap<String, String>> for GatewayResponse {
    fn from(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GatewayResponse {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedResult
// ---------------------------------------------------------------------------

/// A structurally valid gateway response in the crate's own vocabulary.
///
/// Optional gateway fields are empty strings when absent. Nothing here is
/// authenticated; see [`NormalizedResult::verify_signature`] for what the
/// signature does and does not cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    /// `ResponseCode` exactly as received.
    pub response_code: String,
    /// Classification of `response_code`.
    pub outcome: Outcome,
    /// Cardholder-facing text for `outcome`.
    pub response_description: String,
    /// `OrderID`.
    pub order_id: String,
    /// `ReasonCode`.
    pub reason_code: String,
    /// `ReasonCodeDesc`.
    pub reason_description: String,
    /// `ReferenceNo`, or empty.
    pub reference_no: String,
    /// `AuthCode`, or empty.
    pub auth_code: String,
    /// `PaddedCardNo` (masked PAN), or empty.
    pub masked_card_no: String,
    /// `Signature`, or empty.
    pub signature: String,
}

impl NormalizedResult {
    /// `true` only for response code `1`. Says nothing about authenticity.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Checks that the response names this merchant's order and amount.
    ///
    /// The signature is recomputed from `request` and `secret` and compared
    /// in constant time with the response's `Signature`. A response for a
    /// different order id, or with no signature at all, is a
    /// [`SignatureCheck::Mismatch`].
    ///
    /// [`SignatureCheck::Valid`] does not authenticate `outcome`: the signed
    /// fields exclude the response code, and the same signature was already
    /// sent out in the request form.
    pub fn verify_signature(
        &self,
        request: &TransactionRequest,
        secret: &TransactionSecret,
    ) -> SignatureCheck {
        if self.order_id.trim() != request.order_id() {
            warn!(
                response_order_id = %self.order_id,
                request_order_id = %request.order_id(),
                "response is for a different order"
            );
            return SignatureCheck::Mismatch;
        }
        verify_signature(request, secret, &self.signature)
    }
}

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

/// Validates and normalizes a gateway callback.
///
/// # Errors
///
/// [`GatewayError::MalformedResponse`] naming every missing required field
/// (`ResponseCode`, `OrderID`, `ReasonCode`, `ReasonCodeDesc`). No partial
/// result is produced. Unknown response codes are not errors; they classify
/// as [`Outcome::Failed`].
pub fn interpret_response(response: &GatewayResponse) -> Result<NormalizedResult, GatewayError> {
    let missing: Vec<&'static str> = field::REQUIRED
        .iter()
        .copied()
        .filter(|name| response.get(name).is_none())
        .collect();
    if !missing.is_empty() {
        warn!(missing = ?missing, "gateway response is missing required fields");
        return Err(GatewayError::MalformedResponse { missing });
    }

    // Required fields are known present here; absent optionals become "".
    let value = |name: &str| response.get(name).unwrap_or_default().to_string();

    let response_code = value(field::RESPONSE_CODE);
    let outcome = classify(&response_code);

    let result = NormalizedResult {
        response_description: outcome.description().to_string(),
        outcome,
        order_id: value(field::ORDER_ID),
        reason_code: value(field::REASON_CODE),
        reason_description: value(field::REASON_DESCRIPTION),
        reference_no: value(field::REFERENCE_NO),
        auth_code: value(field::AUTH_CODE),
        masked_card_no: value(field::PADDED_CARD_NO),
        signature: value(field::SIGNATURE),
        response_code,
    };

    debug!(
        order_id = %result.order_id,
        response_code = %result.response_code,
        outcome = %result.outcome,
        "interpreted gateway response"
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
