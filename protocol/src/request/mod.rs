//! # Request Module
//!
//! Everything on the outbound path: from merchant settings and an order to
//! the signed form the transport layer POSTs to the gateway.
//!
//! ```text
//! types.rs    - SignatureMethod and CurrencyCode, with their wire spellings
//! builder.rs  - TransactionRequest and its validating builder
//! signing.rs  - Canonical signing payload, signature, verification
//! form.rs     - SignedRequestFields, the ordered form handed to transport
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Configure** a [`crate::config::MerchantConfig`] once per merchant.
//! 2. **Build** a [`TransactionRequest`] per order. Amount canonicalization
//!    and field checks happen here.
//! 3. **Sign** with [`sign_request`], lending the
//!    [`crate::crypto::TransactionSecret`] for the duration of the call.
//! 4. **Submit**: the transport layer serializes [`SignedRequestFields`].
//! 5. **Verify** a returned signature with [`verify_signature`] against the
//!    same request.

pub mod builder;
pub mod form;
pub mod signing;
pub mod types;

pub use builder::{TransactionRequest, TransactionRequestBuilder};
pub use form::{sign_request, SignedRequestFields};
pub use signing::{compute_signature, verify_signature, SignatureCheck};
pub use types::{CurrencyCode, SignatureMethod};
