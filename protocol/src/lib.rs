// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # MPG Protocol: Core Library
//!
//! Request signing and response interpretation for the Maldives Payment
//! Gateway (MPG) redirect flow. The merchant builds a signed form, the
//! cardholder's browser posts it to the gateway, and the gateway posts the
//! outcome back to the merchant's return URL. This crate owns both ends of
//! that exchange and nothing in between: no HTTP, no HTML, no storage.
//!
//! ## Architecture
//!
//! - **config** - Gateway constants, field names, and `MerchantConfig`.
//! - **error** - `GatewayError`, the one error type.
//! - **crypto** - SHA-1/base64 digest, constant-time compare, the secret.
//! - **amount** - Fixed-width minor-unit amount canonicalization.
//! - **request** - `TransactionRequest`, signing, the outbound form.
//! - **response** - Response code table and callback interpretation.
//! - **signer** - `PaymentRequestSigner`, the per-merchant facade.
//!
//! ## Ground rules
//!
//! 1. Every function is pure and synchronous. No shared mutable state.
//! 2. The transaction secret is borrowed per call and never stored,
//!    logged, or serialized.
//! 3. Values that enter the signature are validated when they are built,
//!    not when they are signed.
//! 4. A signature mismatch is an answer, not an error.
//!
//! ## Example
//!
//! ```
//! use mpg_protocol::{MerchantConfig, PaymentRequestSigner, TransactionSecret};
//! use rust_decimal::Decimal;
//!
//! let merchant = MerchantConfig::builder()
//!     .acquirer_id("A1")
//!     .merchant_id("M1")
//!     .return_url("https://shop.example.mv/return")
//!     .build()
//!     .unwrap();
//! let signer = PaymentRequestSigner::new(merchant);
//! let secret = TransactionSecret::new("s3cret").unwrap();
//!
//! let request = signer.request("ORD100", Decimal::new(1255, 1)).unwrap();
//! let form = signer.sign(&request, &secret);
//!
//! assert_eq!(form.get("PurchaseAmt"), Some("000000012550"));
//! assert_eq!(form.signature(), "qJkK9KIiL6Lvw7UAFmBZMz+1UR8=");
//! ```

pub mod amount;
pub mod config;
pub mod crypto;
pub mod error;
pub mod request;
pub mod response;
pub mod signer;

pub use amount::{canonicalize_amount, CanonicalAmount};
pub use config::{MerchantConfig, MerchantConfigBuilder};
pub use crypto::TransactionSecret;
pub use error::GatewayError;
pub use request::{
    compute_signature, sign_request, verify_signature, CurrencyCode, SignatureCheck,
    SignatureMethod, SignedRequestFields, TransactionRequest, TransactionRequestBuilder,
};
pub use response::{interpret_response, GatewayResponse, NormalizedResult, Outcome};
pub use signer::PaymentRequestSigner;
