//! # Cryptographic Primitives
//!
//! Everything the gateway protocol needs from cryptography, and nothing more:
//!
//! - **SHA-1 + base64** for the request and response signature.
//! - **Constant-time comparison** for checking a signature someone else sent.
//! - **A zeroizing secret type** for the merchant's transaction password.
//!
//! Thin wrappers over audited crates (`sha1`, `base64`, `subtle`, `zeroize`).
//! If you find yourself writing a loop over digest bytes anywhere else in the
//! crate, it belongs here instead.

pub mod compare;
pub mod hash;
pub mod secret;

pub use compare::constant_time_eq;
pub use hash::{decode_signature, encode_signature, sha1_multi};
pub use secret::TransactionSecret;
