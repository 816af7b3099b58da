//! # Gateway Constants & Merchant Configuration
//!
//! Every magic number the MPG integration depends on lives here, next to the
//! [`MerchantConfig`] that carries the per-merchant scalars. If a field width
//! or a field name is hardcoded anywhere else, move it here.
//!
//! The configuration is validated once, at construction. A `MerchantConfig`
//! that exists is a `MerchantConfig` that can sign: identifiers are in their
//! canonical encoding, URLs are absolute, and the currency exponent agrees
//! with the currency.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::request::types::{CurrencyCode, SignatureMethod};

// ---------------------------------------------------------------------------
// Gateway defaults
// ---------------------------------------------------------------------------

/// Redirect endpoint of the production gateway.
pub const DEFAULT_GATEWAY_URL: &str =
    "https://egateway.bankofmaldives.com.mv/SENTRY/PaymentGateway/Application/RedirectLink.aspx";

/// Protocol version sent in the `Version` field.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.0.0";

/// Maldivian Rufiyaa, the gateway's home currency.
pub const DEFAULT_CURRENCY: CurrencyCode = CurrencyCode::MVR;

/// MVR has two minor-unit digits (laari).
pub const DEFAULT_CURRENCY_EXPONENT: u8 = 2;

// ---------------------------------------------------------------------------
// Field encodings
// ---------------------------------------------------------------------------

/// Width of `PurchaseAmt`: minor units, left-padded with `'0'`.
pub const AMOUNT_FIELD_WIDTH: usize = 12;

/// ISO 4217 tops out at four minor-unit digits.
pub const MAX_CURRENCY_EXPONENT: u8 = 4;

/// Width of `PurchaseCurrency`: ISO 4217 numeric, zero-padded.
pub const CURRENCY_FIELD_WIDTH: usize = 3;

pub const MAX_MERCHANT_ID_LENGTH: usize = 15;
pub const MAX_ACQUIRER_ID_LENGTH: usize = 11;
pub const MAX_ORDER_ID_LENGTH: usize = 150;
pub const MAX_SECRET_LENGTH: usize = 256;

/// SHA-1 output size in bytes.
pub const DIGEST_LENGTH: usize = 20;

/// Length of a base64-encoded SHA-1 digest, padding included.
pub const SIGNATURE_LENGTH: usize = 28;

// ---------------------------------------------------------------------------
// Gateway field names
// ---------------------------------------------------------------------------

/// Outbound form field names, in the order the gateway documents them.
pub mod request_fields {
    pub const VERSION: &str = "Version";
    pub const MERCHANT_ID: &str = "MerID";
    pub const ACQUIRER_ID: &str = "AcqID";
    pub const RETURN_URL: &str = "MerRespURL";
    pub const PURCHASE_CURRENCY: &str = "PurchaseCurrency";
    pub const PURCHASE_CURRENCY_EXPONENT: &str = "PurchaseCurrencyExponent";
    pub const ORDER_ID: &str = "OrderID";
    pub const SIGNATURE_METHOD: &str = "SignatureMethod";
    pub const PURCHASE_AMOUNT: &str = "PurchaseAmt";
    pub const GATEWAY_URL: &str = "Url";
    pub const SIGNATURE: &str = "Signature";
}

/// Inbound callback field names.
pub mod response_fields {
    pub const RESPONSE_CODE: &str = "ResponseCode";
    pub const ORDER_ID: &str = "OrderID";
    pub const REASON_CODE: &str = "ReasonCode";
    pub const REASON_DESCRIPTION: &str = "ReasonCodeDesc";
    pub const REFERENCE_NO: &str = "ReferenceNo";
    pub const AUTH_CODE: &str = "AuthCode";
    pub const PADDED_CARD_NO: &str = "PaddedCardNo";
    pub const SIGNATURE: &str = "Signature";

    /// A response missing any of these is rejected outright.
    pub const REQUIRED: [&str; 4] = [RESPONSE_CODE, ORDER_ID, REASON_CODE, REASON_DESCRIPTION];
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Checks an identifier that is concatenated into the signing payload.
///
/// `extra` lists punctuation allowed on top of ASCII alphanumerics.
pub(crate) fn check_identifier(
    field: &'static str,
    value: &str,
    max_len: usize,
    extra: &[char],
) -> Result<(), GatewayError> {
    if value.is_empty() {
        return Err(GatewayError::invalid(field, "must not be empty"));
    }
    if value.len() > max_len {
        return Err(GatewayError::invalid(
            field,
            format!("{} characters exceeds the limit of {}", value.len(), max_len),
        ));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !extra.contains(c))
    {
        return Err(GatewayError::invalid(
            field,
            format!("character {:?} is not allowed", c),
        ));
    }
    Ok(())
}

fn check_url(field: &'static str, value: &str) -> Result<(), GatewayError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| GatewayError::invalid(field, "must be an absolute http(s) URL"))?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(GatewayError::invalid(field, "missing host"));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(GatewayError::invalid(field, "must not contain whitespace"));
    }
    Ok(())
}

fn check_version(value: &str) -> Result<(), GatewayError> {
    if value.is_empty() {
        return Err(GatewayError::invalid("Version", "must not be empty"));
    }
    if !value.chars().all(|c| c.is_ascii_graphic()) {
        return Err(GatewayError::invalid(
            "Version",
            "must be printable ASCII without whitespace",
        ));
    }
    Ok(())
}

/// Checks the exponent range and, for currencies we know, the ISO minor-unit count.
pub(crate) fn check_exponent(currency: CurrencyCode, exponent: u8) -> Result<(), GatewayError> {
    if exponent > MAX_CURRENCY_EXPONENT {
        return Err(GatewayError::invalid(
            "PurchaseCurrencyExponent",
            format!("{} exceeds the maximum of {}", exponent, MAX_CURRENCY_EXPONENT),
        ));
    }
    match currency.iso_exponent() {
        Some(expected) if expected != exponent => Err(GatewayError::invalid(
            "PurchaseCurrencyExponent",
            format!(
                "currency {} has {} minor-unit digits, got {}",
                currency, expected, exponent
            ),
        )),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// MerchantConfig
// ---------------------------------------------------------------------------

/// Per-merchant gateway settings.
///
/// Holds everything needed to build a request except the order itself and
/// the transaction secret. The secret is deliberately absent: it is passed
/// into each sign or verify call as a [`crate::crypto::TransactionSecret`].
///
/// Fields are private. Construct through [`MerchantConfigBuilder`] or by
/// deserializing, which runs the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MerchantSettings", into = "MerchantSettings")]
pub struct MerchantConfig {
    acquirer_id: String,
    merchant_id: String,
    gateway_url: String,
    version: String,
    signature_method: SignatureMethod,
    return_url: String,
    currency: CurrencyCode,
    currency_exponent: u8,
}

impl MerchantConfig {
    /// Starts a builder with the gateway defaults filled in.
    pub fn builder() -> MerchantConfigBuilder {
        MerchantConfigBuilder::new()
    }

    pub fn acquirer_id(&self) -> &str {
        &self.acquirer_id
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn currency_exponent(&self) -> u8 {
        self.currency_exponent
    }
}

/// Unvalidated, serde-facing shape of [`MerchantConfig`].
///
/// Field names follow the camelCase used in merchant JSON files. Optional
/// fields fall back to the gateway defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MerchantSettings {
    pub acquirer_id: Option<String>,
    pub merchant_id: Option<String>,
    pub gateway_url: Option<String>,
    pub version: Option<String>,
    pub signature_method: Option<String>,
    pub return_url: Option<String>,
    pub purchase_currency: Option<String>,
    pub purchase_currency_exponent: Option<u8>,
}

impl TryFrom<MerchantSettings> for MerchantConfig {
    type Error = GatewayError;

    fn try_from(settings: MerchantSettings) -> Result<Self, Self::Error> {
        let mut builder = MerchantConfigBuilder::new();
        builder.acquirer_id = settings.acquirer_id;
        builder.merchant_id = settings.merchant_id;
        builder.return_url = settings.return_url;
        if let Some(url) = settings.gateway_url {
            builder = builder.gateway_url(&url);
        }
        if let Some(version) = settings.version {
            builder = builder.version(&version);
        }
        if let Some(method) = settings.signature_method {
            builder = builder.signature_method(method.parse()?);
        }
        if let Some(currency) = settings.purchase_currency {
            builder = builder.currency(currency.parse()?);
        }
        if let Some(exponent) = settings.purchase_currency_exponent {
            builder = builder.currency_exponent(exponent);
        }
        builder.build()
    }
}

impl From<MerchantConfig> for MerchantSettings {
    fn from(config: MerchantConfig) -> Self {
        Self {
            acquirer_id: Some(config.acquirer_id),
            merchant_id: Some(config.merchant_id),
            gateway_url: Some(config.gateway_url),
            version: Some(config.version),
            signature_method: Some(config.signature_method.to_string()),
            return_url: Some(config.return_url),
            purchase_currency: Some(config.currency.to_string()),
            purchase_currency_exponent: Some(config.currency_exponent),
        }
    }
}

/// Fluent builder for [`MerchantConfig`].
///
/// ```
/// use mpg_protocol::config::MerchantConfig;
///
/// let config = MerchantConfig::builder()
///     .acquirer_id("407387")
///     .merchant_id("9800000001")
///     .return_url("https://shop.example.mv/payment/return")
///     .build()
///     .unwrap();
/// assert_eq!(config.currency().to_string(), "462");
/// ```
#[derive(Debug, Clone)]
pub struct MerchantConfigBuilder {
    acquirer_id: Option<String>,
    merchant_id: Option<String>,
    gateway_url: String,
    version: String,
    signature_method: SignatureMethod,
    return_url: Option<String>,
    currency: CurrencyCode,
    currency_exponent: u8,
}

impl Default for MerchantConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MerchantConfigBuilder {
    /// Defaults: production gateway URL, version `1.0.0`, `SHA1`, MVR with
    /// exponent 2. Acquirer, merchant and return URL have no default.
    pub fn new() -> Self {
        Self {
            acquirer_id: None,
            merchant_id: None,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            version: DEFAULT_PROTOCOL_VERSION.to_string(),
            signature_method: SignatureMethod::Sha1,
            return_url: None,
            currency: DEFAULT_CURRENCY,
            currency_exponent: DEFAULT_CURRENCY_EXPONENT,
        }
    }

    pub fn acquirer_id(mut self, id: &str) -> Self {
        self.acquirer_id = Some(id.to_string());
        self
    }

    pub fn merchant_id(mut self, id: &str) -> Self {
        self.merchant_id = Some(id.to_string());
        self
    }

    pub fn gateway_url(mut self, url: &str) -> Self {
        self.gateway_url = url.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = method;
        self
    }

    pub fn return_url(mut self, url: &str) -> Self {
        self.return_url = Some(url.to_string());
        self
    }

    pub fn currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn currency_exponent(mut self, exponent: u8) -> Self {
        self.currency_exponent = exponent;
        self
    }

    /// Validates every field and produces the config.
    ///
    /// # Errors
    ///
    /// [`GatewayError::MissingField`] when acquirer, merchant or return URL
    /// were never set, [`GatewayError::InvalidField`] for anything outside its
    /// canonical encoding.
    pub fn build(self) -> Result<MerchantConfig, GatewayError> {
        let acquirer_id = self.acquirer_id.ok_or(GatewayError::MissingField("AcqID"))?;
        let merchant_id = self.merchant_id.ok_or(GatewayError::MissingField("MerID"))?;
        let return_url = self
            .return_url
            .ok_or(GatewayError::MissingField("MerRespURL"))?;

        check_identifier("AcqID", &acquirer_id, MAX_ACQUIRER_ID_LENGTH, &[])?;
        check_identifier("MerID", &merchant_id, MAX_MERCHANT_ID_LENGTH, &[])?;
        check_url("MerRespURL", &return_url)?;
        check_url("Url", &self.gateway_url)?;
        check_version(&self.version)?;
        check_exponent(self.currency, self.currency_exponent)?;

        Ok(MerchantConfig {
            acquirer_id,
            merchant_id,
            gateway_url: self.gateway_url,
            version: self.version,
            signature_method: self.signature_method,
            return_url,
            currency: self.currency,
            currency_exponent: self.currency_exponent,
        })
    }
}
