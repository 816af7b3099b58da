//! # Transaction Secret
//!
//! The shared secret ("transaction password") the gateway issues to each
//! merchant. Anyone holding it can mint valid signatures, so the type is
//! built to be hard to leak:
//!
//! - The bytes are zeroized when the value is dropped.
//! - `Debug` prints a placeholder, never the value.
//! - There is no `Serialize`, no `Display`, and no `Clone`. Putting the
//!   secret into a JSON body or a log line takes deliberate work.
//! - Only this crate can read the bytes, and only to feed the hasher.
//!
//! The secret is not stored in [`crate::config::MerchantConfig`] or in any
//! request. Callers hold it and lend it, by reference, to each sign or
//! verify call.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::MAX_SECRET_LENGTH;
use crate::error::GatewayError;

/// Merchant transaction secret, scoped to the calls that borrow it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct TransactionSecret {
    inner: String,
}

impl TransactionSecret {
    /// Wraps a secret after checking its encoding.
    ///
    /// The secret is the first field of the signing concatenation, so it
    /// must be non-empty, at most [`MAX_SECRET_LENGTH`] bytes, and free of
    /// control characters.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidField`] for `transactionSecret`. The rejected
    /// value is zeroized before the error is returned and is never part of
    /// the error message.
    pub fn new(secret: impl Into<String>) -> Result<Self, GatewayError> {
        // Wrap first so every early return below still zeroizes.
        let secret = Self {
            inner: secret.into(),
        };
        if secret.inner.is_empty() {
            return Err(GatewayError::invalid("transactionSecret", "must not be empty"));
        }
        if secret.inner.len() > MAX_SECRET_LENGTH {
            return Err(GatewayError::invalid(
                "transactionSecret",
                format!("longer than {} bytes", MAX_SECRET_LENGTH),
            ));
        }
        if secret.inner.chars().any(char::is_control) {
            return Err(GatewayError::invalid(
                "transactionSecret",
                "contains control characters",
            ));
        }
        Ok(secret)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl fmt::Debug for TransactionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransactionSecret(***)")
    }
}
