// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # MPG Command-Line Tool
//!
//! Entry point for the `mpg` binary. Parses CLI arguments, initializes
//! logging, and runs one of:
//!
//! - `sign`      - build and sign a request, print the form fields
//! - `amount`    - print the canonical `PurchaseAmt` for an amount
//! - `interpret` - normalize (and optionally authenticate) a callback
//! - `version`   - print build version information

mod cli;
mod config;
mod logging;

use anyhow::{bail, Result};
use clap::Parser;
use serde_json::json;

use mpg_protocol::config::{DEFAULT_GATEWAY_URL, DEFAULT_PROTOCOL_VERSION};
use mpg_protocol::{
    canonicalize_amount, interpret_response, PaymentRequestSigner, SignatureMethod,
};

use cli::{Commands, MpgCli};

fn main() -> Result<()> {
    let cli = MpgCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Sign(args) => sign(args),
        Commands::Amount(args) => amount(args),
        Commands::Interpret(args) => interpret(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Builds and signs a request and prints the ordered form as JSON.
fn sign(args: cli::SignArgs) -> Result<()> {
    let signer = PaymentRequestSigner::new(config::load_merchant(&args.merchant)?);
    let secret = config::load_secret(args.secret)?;

    let builder = match args.order_id.as_deref() {
        Some(order_id) => signer.builder().order_id(order_id),
        None => signer.builder().generated_order_id(),
    };
    let request = builder.amount(args.amount).build()?;
    let form = signer.sign(&request, &secret);

    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}

/// Prints the canonical amount string.
fn amount(args: cli::AmountArgs) -> Result<()> {
    let canonical = canonicalize_amount(args.amount, args.exponent)?;
    println!("{}", canonical);
    Ok(())
}

/// Interprets a callback; with `--verify`, also authenticates it.
fn interpret(args: cli::InterpretArgs) -> Result<()> {
    let response = config::load_response(&args.response)?;
    let result = interpret_response(&response)?;

    // clap guarantees --amount and --order-id whenever --verify is set.
    let (true, Some(amount), Some(order_id)) = (args.verify, args.amount, args.order_id) else {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    };

    let signer = PaymentRequestSigner::new(config::load_merchant(&args.merchant)?);
    let secret = config::load_secret(args.secret)?;
    let request = signer.request(&order_id, amount)?;
    let check = result.verify_signature(&request, &secret);

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "result": result, "signature": check }))?
    );
    if !check.is_valid() {
        bail!("response signature does not match order {}", request.order_id());
    }
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("mpg       {}", env!("CARGO_PKG_VERSION"));
    println!("protocol  {}", DEFAULT_PROTOCOL_VERSION);
    println!("signature {}", SignatureMethod::Sha1);
    println!("gateway   {}", DEFAULT_GATEWAY_URL);
}
