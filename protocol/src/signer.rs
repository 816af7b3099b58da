//! # PaymentRequestSigner
//!
//! One merchant's view of the gateway. Holds the validated
//! [`MerchantConfig`] and exposes the three jobs the rest of the crate does
//! as methods: canonicalize an amount, build and sign a request, interpret
//! and authenticate a response.
//!
//! The signer holds no secret and no mutable state. Share it freely across
//! threads; every call builds fresh output values.

use rust_decimal::Decimal;
use tracing::info;

use crate::amount::{canonicalize_amount, CanonicalAmount};
use crate::config::MerchantConfig;
use crate::crypto::TransactionSecret;
use crate::error::GatewayError;
use crate::request::{
    sign_request, verify_signature, SignatureCheck, SignedRequestFields, TransactionRequest,
    TransactionRequestBuilder,
};
use crate::response::{interpret_response, GatewayResponse, NormalizedResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequestSigner {
    merchant: MerchantConfig,
}

impl PaymentRequestSigner {
    pub fn new(merchant: MerchantConfig) -> Self {
        Self { merchant }
    }

    pub fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    /// Canonicalizes `amount` with this merchant's currency exponent.
    pub fn canonicalize(&self, amount: Decimal) -> Result<CanonicalAmount, GatewayError> {
        canonicalize_amount(amount, self.merchant.currency_exponent())
    }

    /// A request builder bound to this merchant.
    pub fn builder(&self) -> TransactionRequestBuilder {
        TransactionRequest::builder(self.merchant.clone())
    }

    /// Builds a request for a caller-assigned order id.
    pub fn request(&self, order_id: &str, amount: Decimal) -> Result<TransactionRequest, GatewayError> {
        self.builder().order_id(order_id).amount(amount).build()
    }

    /// Signs a request into the ordered gateway form.
    ///
    /// The secret is borrowed for this call only and does not appear in the
    /// returned fields.
    pub fn sign(&self, request: &TransactionRequest, secret: &TransactionSecret) -> SignedRequestFields {
        let form = sign_request(request, secret);
        info!(
            order_id = %request.order_id(),
            amount = %request.canonical_amount(),
            currency = %request.merchant().currency(),
            "signed payment request"
        );
        form
    }

    /// Checks a signature against the one recomputed from `request`.
    pub fn verify(
        &self,
        request: &TransactionRequest,
        secret: &TransactionSecret,
        candidate: &str,
    ) -> SignatureCheck {
        verify_signature(request, secret, candidate)
    }

    /// Validates and normalizes a gateway callback. Does not authenticate it.
    pub fn interpret(&self, response: &GatewayResponse) -> Result<NormalizedResult, GatewayError> {
        interpret_response(response)
    }

    /// Interprets a callback and checks its signature against the request it
    /// answers, in one call.
    ///
    /// A structurally broken response is still an error; a signature that
    /// does not match comes back with [`SignatureCheck::Mismatch`] so the
    /// caller decides what to do with it. [`SignatureCheck::Valid`] binds the
    /// callback to the order and amount only, not to its outcome.
    pub fn interpret_verified(
        &self,
        response: &GatewayResponse,
        request: &TransactionRequest,
        secret: &TransactionSecret,
    ) -> Result<(NormalizedResult, SignatureCheck), GatewayError> {
        let result = interpret_response(response)?;
        let check = result.verify_signature(request, secret);
        Ok((result, check))
    }
}
