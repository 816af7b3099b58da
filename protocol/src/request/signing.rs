//! Request signing and signature verification.
//!
//! # Canonical signing payload
//!
//! The gateway's signature is `base64(SHA-1(payload))`, where `payload` is
//! the byte concatenation, with no delimiters, of:
//!
//! | # | Field            | Encoding                                   |
//! |---|------------------|--------------------------------------------|
//! | 1 | transaction secret | as issued, no control characters         |
//! | 2 | merchant id      | 1..=15 ASCII alphanumerics                 |
//! | 3 | acquirer id      | 1..=11 ASCII alphanumerics                 |
//! | 4 | order id         | 1..=150 ASCII alphanumerics, `-`, `_`      |
//! | 5 | amount           | 12 ASCII digits, minor units, zero-padded  |
//! | 6 | currency         | 3 ASCII digits, ISO 4217 numeric           |
//!
//! The order is fixed by the gateway and is not configurable. Field
//! boundaries are implicit, which is why every field's encoding is enforced
//! when the [`TransactionRequest`] is built rather than trusted here.
//!
//! The payload is fed to the hasher field by field. It is never assembled
//! into one buffer, so the secret is not copied anywhere that outlives the
//! call.

use serde::Serialize;
use tracing::{debug, warn};

use super::builder::TransactionRequest;
use super::types::SignatureMethod;
use crate::crypto::{constant_time_eq, decode_signature, encode_signature, sha1_multi};
use crate::crypto::TransactionSecret;

/// Outcome of checking a signature someone else produced.
///
/// A mismatch is an expected, adversarial case and not an error, so this is
/// a plain value rather than a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureCheck {
    /// The candidate equals the signature recomputed from the request.
    Valid,
    /// The candidate is absent, malformed, or does not match.
    Mismatch,
}

impl SignatureCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Computes the raw digest for a request under the given secret.
fn digest(request: &TransactionRequest, secret: &TransactionSecret) -> [u8; 20] {
    let merchant = request.merchant();
    let currency = merchant.currency().to_string();

    match merchant.signature_method() {
        SignatureMethod::Sha1 => sha1_multi(&[
            secret.as_bytes(),
            merchant.merchant_id().as_bytes(),
            merchant.acquirer_id().as_bytes(),
            request.order_id().as_bytes(),
            request.canonical_amount().as_str().as_bytes(),
            currency.as_bytes(),
        ]),
    }
}

/// Produces the `Signature` value for a request.
///
/// Pure and deterministic: the same request and secret always give the same
/// 28-character base64 string. Requests are validated at construction and
/// the signature method is checked when it is parsed, so nothing here can
/// fail.
///
/// # Example
///
/// ```
/// use mpg_protocol::config::MerchantConfig;
/// use mpg_protocol::crypto::TransactionSecret;
/// use mpg_protocol::request::{compute_signature, TransactionRequest};
/// use rust_decimal::Decimal;
///
/// let merchant = MerchantConfig::builder()
///     .acquirer_id("A1")
///     .merchant_id("M1")
///     .return_url("https://shop.example.mv/return")
///     .build()
///     .unwrap();
/// let request = TransactionRequest::builder(merchant)
///     .order_id("ORD100")
///     .amount(Decimal::new(1255, 1))
///     .build()
///     .unwrap();
/// let secret = TransactionSecret::new("s3cret").unwrap();
///
/// assert_eq!(compute_signature(&request, &secret), "qJkK9KIiL6Lvw7UAFmBZMz+1UR8=");
/// ```
pub fn compute_signature(request: &TransactionRequest, secret: &TransactionSecret) -> String {
    let signature = encode_signature(&digest(request, secret));
    debug!(
        order_id = %request.order_id(),
        method = %request.merchant().signature_method(),
        "computed request signature"
    );
    signature
}

/// Checks a signature against the one recomputed from `request`.
///
/// The candidate is base64-decoded and compared as digest bytes in constant
/// time. Surrounding whitespace is tolerated; anything that does not decode
/// to exactly 20 bytes is a [`SignatureCheck::Mismatch`].
pub fn verify_signature(
    request: &TransactionRequest,
    secret: &TransactionSecret,
    candidate: &str,
) -> SignatureCheck {
    let Some(provided) = decode_signature(candidate) else {
        warn!(order_id = %request.order_id(), "signature is not a base64 SHA-1 digest");
        return SignatureCheck::Mismatch;
    };

    let expected = digest(request, secret);
    if constant_time_eq(&expected, &provided) {
        debug!(order_id = %request.order_id(), "signature verified");
        SignatureCheck::Valid
    } else {
        warn!(order_id = %request.order_id(), "signature mismatch");
        SignatureCheck::Mismatch
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
