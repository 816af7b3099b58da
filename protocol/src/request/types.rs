//! Value types that appear in outbound MPG requests.
//!
//! Both types here are small and `Copy`. They parse from, and render to,
//! exactly the strings the gateway expects on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::CURRENCY_FIELD_WIDTH;
use crate::error::GatewayError;

// ---------------------------------------------------------------------------
// SignatureMethod
// ---------------------------------------------------------------------------

/// Digest algorithm named in the `SignatureMethod` field.
///
/// The gateway accepts exactly one method. Anything else is rejected while
/// parsing, so no code path can reach the hasher with an unknown method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SignatureMethod {
    /// SHA-1 over the concatenated fields, base64 encoded.
    Sha1,
}

impl SignatureMethod {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA1" => Ok(Self::Sha1),
            other => Err(GatewayError::UnsupportedSignatureMethod(other.to_string())),
        }
    }
}

impl TryFrom<String> for SignatureMethod {
    type Error = GatewayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SignatureMethod> for String {
    fn from(method: SignatureMethod) -> Self {
        method.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// CurrencyCode
// ---------------------------------------------------------------------------

/// ISO 4217 numeric currency code, rendered as three zero-padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(u16);

impl CurrencyCode {
    /// Maldivian Rufiyaa.
    pub const MVR: Self = Self(462);
    /// United States Dollar.
    pub const USD: Self = Self(840);
    /// Euro.
    pub const EUR: Self = Self(978);
    /// Pound Sterling.
    pub const GBP: Self = Self(826);
    /// Indian Rupee.
    pub const INR: Self = Self(356);
    /// Japanese Yen. No minor unit.
    pub const JPY: Self = Self(392);
    /// Bahraini Dinar. Three minor-unit digits.
    pub const BHD: Self = Self(48);
    /// Kuwaiti Dinar.
    pub const KWD: Self = Self(414);
    /// Omani Rial.
    pub const OMR: Self = Self(512);

    /// Wraps a numeric code. Valid codes are `1..=999`.
    pub fn new(code: u16) -> Result<Self, GatewayError> {
        if code == 0 || code > 999 {
            return Err(GatewayError::invalid(
                "PurchaseCurrency",
                format!("{} is not a three-digit ISO 4217 code", code),
            ));
        }
        Ok(Self(code))
    }

    pub fn numeric(&self) -> u16 {
        self.0
    }

    /// Minor-unit digits for the currencies this crate knows about.
    ///
    /// `None` means "unknown here", not "has no minor unit".
    pub fn iso_exponent(&self) -> Option<u8> {
        match *self {
            Self::MVR | Self::USD | Self::EUR | Self::GBP | Self::INR => Some(2),
            Self::JPY => Some(0),
            Self::BHD | Self::KWD | Self::OMR => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = GatewayError;

    /// Accepts exactly three ASCII digits, e.g. `"462"` or `"048"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CURRENCY_FIELD_WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GatewayError::invalid(
                "PurchaseCurrency",
                format!("{:?} is not three ASCII digits", s),
            ));
        }
        let code = s
            .parse::<u16>()
            .map_err(|e| GatewayError::invalid("PurchaseCurrency", e.to_string()))?;
        Self::new(code)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = GatewayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
