//! Merchant settings and input loading for the CLI.
//!
//! Layering, lowest to highest: gateway defaults, the JSON settings file,
//! then flags and environment variables. Validation happens once, in
//! `MerchantConfig::try_from`, after all layers are merged.

use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;

use mpg_protocol::config::MerchantSettings;
use mpg_protocol::{GatewayResponse, MerchantConfig, TransactionSecret};

use crate::cli::{MerchantArgs, SecretArgs};

/// Reads a merchant settings file.
pub fn read_settings(path: &Path) -> Result<MerchantSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read merchant settings from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse merchant settings in {}", path.display()))
}

/// Merges file and overrides into a validated [`MerchantConfig`].
pub fn load_merchant(args: &MerchantArgs) -> Result<MerchantConfig> {
    let mut settings = match &args.config {
        Some(path) => read_settings(path)?,
        None => MerchantSettings::default(),
    };

    let overrides = [
        (&mut settings.merchant_id, &args.merchant_id),
        (&mut settings.acquirer_id, &args.acquirer_id),
        (&mut settings.return_url, &args.return_url),
        (&mut settings.gateway_url, &args.gateway_url),
        (&mut settings.purchase_currency, &args.currency),
    ];
    for (slot, value) in overrides {
        if value.is_some() {
            slot.clone_from(value);
        }
    }
    if args.currency_exponent.is_some() {
        settings.purchase_currency_exponent = args.currency_exponent;
    }

    let merchant = MerchantConfig::try_from(settings).context("invalid merchant settings")?;
    tracing::debug!(
        merchant_id = %merchant.merchant_id(),
        acquirer_id = %merchant.acquirer_id(),
        currency = %merchant.currency(),
        "merchant settings loaded"
    );
    Ok(merchant)
}

/// Takes the secret out of the parsed arguments.
pub fn load_secret(args: SecretArgs) -> Result<TransactionSecret> {
    let raw = args
        .secret
        .ok_or_else(|| anyhow!("no transaction secret: set MPG_TRANSACTION_SECRET or pass --secret"))?;
    TransactionSecret::new(raw).context("invalid transaction secret")
}

/// Reads a captured callback as a flat JSON object. `-` reads stdin.
pub fn load_response(path: &Path) -> Result<GatewayResponse> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read gateway response from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read gateway response from {}", path.display()))?
    };
    serde_json::from_str(&raw).context("gateway response must be a JSON object of string fields")
}
