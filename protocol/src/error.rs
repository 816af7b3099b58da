//! Error types for the MPG signing and response path.
//!
//! Every fallible operation in this crate returns a [`GatewayError`]. The
//! variants never carry the transaction secret or the signing payload, so an
//! error can be logged or shown to an operator as-is.

use thiserror::Error;

/// Errors raised while building, signing, or interpreting MPG messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The amount in minor units needs more digits than the `PurchaseAmt`
    /// field holds. The request is never signed with a truncated amount.
    #[error("amount {amount} needs {digits} digits in minor units, field width is {width}")]
    AmountOverflow {
        /// The amount as supplied, in major units.
        amount: String,
        /// Digits the minor-unit value would need.
        digits: usize,
        /// Fixed width of the gateway field.
        width: usize,
    },

    /// Purchase amounts cannot be negative.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(String),

    /// The configured signature method is not one the gateway accepts.
    #[error("unsupported signature method: {0}")]
    UnsupportedSignatureMethod(String),

    /// A gateway response lacked one or more required fields.
    #[error("malformed response: missing {}", .missing.join(", "))]
    MalformedResponse {
        /// Gateway field names that were absent.
        missing: Vec<&'static str>,
    },

    /// A required configuration or request field was never set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field was set but does not match its canonical encoding.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Logical field name (gateway spelling where one exists).
        field: &'static str,
        /// What is wrong with it. Never echoes secret material.
        reason: String,
    },
}

impl GatewayError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
