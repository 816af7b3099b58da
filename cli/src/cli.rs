//! # CLI Interface
//!
//! Defines the command-line argument structure for `mpg` using `clap`
//! derive. Four subcommands: `sign`, `amount`, `interpret`, and `version`.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Maldives Payment Gateway request signer.
///
/// Builds signed redirect forms and checks the callbacks the gateway posts
/// back. Performs no network I/O; results are printed to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "mpg", about = "Maldives Payment Gateway request signer", version, propagate_version = true)]
pub struct MpgCli {
    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, env = "MPG_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "MPG_LOG_LEVEL", default_value = "mpg_cli=info,mpg_protocol=warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and sign a payment request; prints the ordered form fields.
    Sign(SignArgs),
    /// Print the canonical 12-digit `PurchaseAmt` for an amount.
    Amount(AmountArgs),
    /// Interpret a captured gateway callback, optionally authenticating it.
    Interpret(InterpretArgs),
    /// Print version information and exit.
    Version,
}

/// Merchant settings: a JSON file plus per-field overrides.
///
/// Flags and environment variables win over the file; the file wins over
/// the gateway defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct MerchantArgs {
    /// Merchant settings file (JSON, camelCase keys).
    #[arg(long, short = 'c', env = "MPG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Merchant id (`MerID`).
    #[arg(long, env = "MPG_MERCHANT_ID")]
    pub merchant_id: Option<String>,

    /// Acquirer id (`AcqID`).
    #[arg(long, env = "MPG_ACQUIRER_ID")]
    pub acquirer_id: Option<String>,

    /// Merchant return URL (`MerRespURL`).
    #[arg(long, env = "MPG_RETURN_URL")]
    pub return_url: Option<String>,

    /// Gateway redirect endpoint (`Url`).
    #[arg(long, env = "MPG_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// ISO 4217 numeric currency code, e.g. `462`.
    #[arg(long, env = "MPG_CURRENCY")]
    pub currency: Option<String>,

    /// Currency minor-unit exponent.
    #[arg(long, env = "MPG_CURRENCY_EXPONENT")]
    pub currency_exponent: Option<u8>,
}

/// The transaction secret.
///
/// Prefer the environment variable: command-line arguments are visible to
/// other users through the process table.
#[derive(Args, Debug, Clone, Default)]
pub struct SecretArgs {
    /// Transaction password issued by the bank.
    #[arg(long, env = "MPG_TRANSACTION_SECRET", hide_env_values = true)]
    pub secret: Option<String>,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub merchant: MerchantArgs,

    #[command(flatten)]
    pub secret: SecretArgs,

    /// Order id. Generated (UUIDv4, 32 hex digits) when omitted.
    #[arg(long)]
    pub order_id: Option<String>,

    /// Purchase amount in major units, e.g. `125.50`.
    #[arg(long)]
    pub amount: Decimal,
}

/// Arguments for the `amount` subcommand.
#[derive(Parser, Debug)]
pub struct AmountArgs {
    /// Amount in major units.
    pub amount: Decimal,

    /// Minor-unit exponent.
    #[arg(long, short = 'e', default_value_t = 2)]
    pub exponent: u8,
}

/// Arguments for the `interpret` subcommand.
#[derive(Parser, Debug)]
pub struct InterpretArgs {
    /// Callback fields as a flat JSON object. `-` reads stdin.
    #[arg(default_value = "-")]
    pub response: PathBuf,

    /// Authenticate the callback's `Signature` against the original request.
    /// Exits non-zero on mismatch. Needs `--amount` and `--order-id`.
    #[arg(long, requires_all = ["amount", "order_id"])]
    pub verify: bool,

    /// Original purchase amount, needed to rebuild the signed request.
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Order id the callback is expected to answer. Taken from the merchant's
    /// own records, never from the callback.
    #[arg(long)]
    pub order_id: Option<String>,

    #[command(flatten)]
    pub merchant: MerchantArgs,

    #[command(flatten)]
    pub secret: SecretArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        MpgCli::command().debug_assert();
    }

    #[test]
    fn parses_sign() {
        let cli = MpgCli::try_parse_from([
            "mpg", "sign", "--merchant-id", "M1", "--acquirer-id", "A1", "--order-id", "ORD100",
            "--amount", "125.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Sign(args) => {
                assert_eq!(args.merchant.merchant_id.as_deref(), Some("M1"));
                assert_eq!(args.order_id.as_deref(), Some("ORD100"));
                assert_eq!(args.amount, Decimal::new(1255, 1));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn verify_requires_amount() {
        let err = MpgCli::try_parse_from(["mpg", "interpret", "resp.json", "--verify"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn verify_requires_order_id() {
        let err = MpgCli::try_parse_from([
            "mpg", "interpret", "resp.json", "--verify", "--amount", "1.00",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn verify_parses_with_amount_and_order_id() {
        let cli = MpgCli::try_parse_from([
            "mpg", "interpret", "resp.json", "--verify", "--amount", "1.00", "--order-id", "ORD401",
        ])
        .unwrap();
        match cli.command {
            Commands::Interpret(args) => {
                assert!(args.verify);
                assert_eq!(args.order_id.as_deref(), Some("ORD401"));
                assert_eq!(args.amount, Some(Decimal::new(100, 2)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn amount_defaults_to_two_decimals() {
        let cli = MpgCli::try_parse_from(["mpg", "amount", "9.99"]).unwrap();
        match cli.command {
            Commands::Amount(args) => assert_eq!(args.exponent, 2),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
