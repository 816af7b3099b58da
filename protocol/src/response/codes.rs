//! Gateway response codes and their outcomes.
//!
//! The gateway reports a numeric `ResponseCode`. Only a handful are
//! documented; the table below is exhaustive over those and maps everything
//! else, including codes the gateway adds later, to [`Outcome::Failed`].
//! Classification never fails.

use serde::Serialize;
use std::fmt;

/// Normalized meaning of a gateway response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Code `1`: the card was charged.
    Success,
    /// Codes `2`, `3`, `4`, `11`: the issuer declined.
    Rejected,
    /// Any other code.
    Failed,
}

impl Outcome {
    /// Text shown to the cardholder.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "Transaction successful!",
            Self::Rejected => "Transaction was rejected. Please contact your bank.",
            Self::Failed => "Something went wrong. Please try again...",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Rejected => write!(f, "rejected"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Canonical form of a response code for table lookup.
///
/// Trims whitespace; for all-digit codes also strips leading zeros, so
/// `"01"` and `"1"` are the same code. The gateway compares codes
/// numerically and sometimes pads them.
fn normalize(code: &str) -> &str {
    let code = code.trim();
    if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = code.trim_start_matches('0');
        if stripped.is_empty() {
            "0"
        } else {
            stripped
        }
    } else {
        code
    }
}

/// Maps a raw `ResponseCode` to its outcome.
pub fn classify(code: &str) -> Outcome {
    match normalize(code) {
        "1" => Outcome::Success,
        "2" | "3" | "4" | "11" => Outcome::Rejected,
        _ => Outcome::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_codes() {
        assert_eq!(classify("1"), Outcome::Success);
        for code in ["2", "3", "4", "11"] {
            assert_eq!(classify(code), Outcome::Rejected, "code {}", code);
        }
    }

    #[test]
    fn unknown_codes_degrade_to_failed() {
        for code in ["0", "5", "10", "12", "99", "", "abc", "1a", "-1"] {
            assert_eq!(classify(code), Outcome::Failed, "code {:?}", code);
        }
    }

    #[test]
    fn padded_codes_compare_numerically() {
        assert_eq!(classify("01"), Outcome::Success);
        assert_eq!(classify(" 1 "), Outcome::Success);
        assert_eq!(classify("011"), Outcome::Rejected);
        assert_eq!(classify("000"), Outcome::Failed);
    }

    #[test]
    fn descriptions() {
        assert_eq!(classify("1").description(), "Transaction successful!");
        assert_eq!(
            classify("11").description(),
            "Transaction was rejected. Please contact your bank."
        );
        assert_eq!(
            classify("99").description(),
            "Something went wrong. Please try again..."
        );
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Success.to_string(), "success");
        assert_eq!(Outcome::Rejected.to_string(), "rejected");
    }
}
