//! Walkthrough of one MPG redirect payment, start to finish.
//!
//! Configures a merchant, signs a request, prints the form a browser would
//! POST, then plays back three gateway callbacks (approved, declined, forged)
//! and shows how each one is interpreted and authenticated.
//!
//! Run with:
//!   cargo run --example demo

use std::str::FromStr;
use std::time::Instant;

use rust_decimal::Decimal;

use mpg_protocol::{
    compute_signature, GatewayResponse, MerchantConfig, PaymentRequestSigner, SignatureCheck,
    TransactionRequest, TransactionSecret,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!("{BG_BLUE}{BOLD}{WHITE}                                                          {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    MPG PROTOCOL  --  Redirect Payment Walkthrough        {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}                                                          {RESET}");
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]================================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!("{CYAN}----------------------------------------------------------{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn verdict(check: SignatureCheck) {
    match check {
        SignatureCheck::Valid => {
            println!("{GREEN}  [OK] signature matches this order and amount{RESET}");
            println!("{DIM}       outcome is not signed; confirm with the acquirer before fulfilling{RESET}");
        }
        SignatureCheck::Mismatch => println!("{RED}  [!!] signature does not match, do not fulfil{RESET}"),
    }
}

fn callback(request: &TransactionRequest, code: &str, reason: &str, signature: &str) -> GatewayResponse {
    [
        ("ResponseCode", code),
        ("OrderID", request.order_id()),
        ("ReasonCode", code),
        ("ReasonCodeDesc", reason),
        ("ReferenceNo", "412345678901"),
        ("AuthCode", "A1B2C3"),
        ("PaddedCardNo", "XXXXXXXXXXXX1234"),
        ("Signature", signature),
    ]
    .into_iter()
    .collect()
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    banner();

    section(1, "Merchant configuration");
    let merchant = MerchantConfig::builder()
        .acquirer_id("107055")
        .merchant_id("9802231234")
        .return_url("https://shop.example.mv/payment/return")
        .build()?;
    info("Gateway", merchant.gateway_url());
    info("Currency", &format!("{} (exponent {})", merchant.currency(), merchant.currency_exponent()));
    let signer = PaymentRequestSigner::new(merchant);
    let secret = TransactionSecret::new("Pa55w0rd-from-the-bank")?;
    info("Secret", &format!("{:?}", secret));

    section(2, "Signed request form");
    let request = signer.request("ORD20261016000123", Decimal::from_str("1250.755")?)?;
    let form = signer.sign(&request, &secret);
    for (name, value) in form.iter() {
        println!("  {DIM}{name:<26}{RESET} {value}");
    }

    section(3, "Gateway approves");
    let approved = callback(&request, "1", "Transaction is approved", form.signature());
    let (result, check) = signer.interpret_verified(&approved, &request, &secret)?;
    info("Outcome", &result.outcome.to_string());
    info("Message", &result.response_description);
    verdict(check);

    section(4, "Gateway declines");
    let declined = callback(&request, "2", "Do not honour", form.signature());
    let (result, check) = signer.interpret_verified(&declined, &request, &secret)?;
    info("Outcome", &result.outcome.to_string());
    info("Message", &result.response_description);
    verdict(check);

    section(5, "Forged approval");
    let forger = TransactionSecret::new("guessed")?;
    let forged = callback(
        &request,
        "1",
        "Transaction is approved",
        &compute_signature(&request, &forger),
    );
    let (result, check) = signer.interpret_verified(&forged, &request, &secret)?;
    info("Outcome", &result.outcome.to_string());
    verdict(check);

    section(6, "Malformed callback");
    let broken: GatewayResponse = [("OrderID", request.order_id())].into_iter().collect();
    match signer.interpret(&broken) {
        Ok(_) => println!("{RED}  unexpected success{RESET}"),
        Err(e) => println!("{GREEN}  [OK] rejected: {e}{RESET}"),
    }

    println!();
    println!("{DIM}  done in {:.2} ms{RESET}", started.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}
