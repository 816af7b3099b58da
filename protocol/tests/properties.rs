//! Property tests for amount canonicalization, signing, and response codes.

use proptest::prelude::*;
use rust_decimal::Decimal;

use mpg_protocol::{
    canonicalize_amount, compute_signature, interpret_response, verify_signature, GatewayError,
    GatewayResponse, MerchantConfig, Outcome, SignatureCheck, TransactionRequest,
    TransactionSecret,
};

const MAX_MINOR_UNITS: i64 = 999_999_999_999;

fn request(merchant_id: &str, acquirer_id: &str, order_id: &str, minor_units: i64) -> TransactionRequest {
    let merchant = MerchantConfig::builder()
        .acquirer_id(acquirer_id)
        .merchant_id(merchant_id)
        .return_url("https://shop.example.mv/return")
        .build()
        .unwrap();
    TransactionRequest::builder(merchant)
        .order_id(order_id)
        .amount(Decimal::new(minor_units, 2))
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn canonical_amount_round_trips(
        minor in 0..=MAX_MINOR_UNITS,
        exponent in 0u8..=4,
    ) {
        let amount = Decimal::new(minor, u32::from(exponent));
        let canonical = canonicalize_amount(amount, exponent).unwrap();

        prop_assert_eq!(canonical.as_str().len(), 12);
        prop_assert!(canonical.as_str().bytes().all(|b| b.is_ascii_digit()));
        prop_assert_eq!(canonical.as_str().parse::<i64>().unwrap(), minor);
        prop_assert_eq!(canonical.to_major_units(exponent), amount);
    }

    #[test]
    fn excess_precision_rounds_within_half_a_minor_unit(
        mantissa in 0i64..1_000_000_000_000,
        scale in 0u32..=8,
        exponent in 0u8..=4,
    ) {
        let amount = Decimal::new(mantissa, scale);
        match canonicalize_amount(amount, exponent) {
            Ok(canonical) => {
                let back = canonical.to_major_units(exponent);
                let half_unit = Decimal::new(5, u32::from(exponent) + 1);
                prop_assert!((back - amount).abs() <= half_unit);
            }
            Err(GatewayError::AmountOverflow { width, .. }) => prop_assert_eq!(width, 12),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn amounts_past_the_field_width_overflow(
        minor in (MAX_MINOR_UNITS + 1)..i64::MAX,
        exponent in 0u8..=4,
    ) {
        let amount = Decimal::new(minor, u32::from(exponent));
        let overflowed = matches!(
            canonicalize_amount(amount, exponent),
            Err(GatewayError::AmountOverflow { .. })
        );
        prop_assert!(overflowed);
    }

    #[test]
    fn signature_verifies_and_detects_tampering(
        merchant_id in "[A-Za-z0-9]{1,15}",
        acquirer_id in "[A-Za-z0-9]{1,11}",
        order_id in "[A-Za-z0-9_-]{1,40}",
        minor in 0..MAX_MINOR_UNITS,
        secret in "[ -~]{1,64}",
    ) {
        let key = TransactionSecret::new(secret.as_str()).unwrap();
        let original = request(&merchant_id, &acquirer_id, &order_id, minor);
        let signature = compute_signature(&original, &key);

        prop_assert_eq!(signature.len(), 28);
        prop_assert_eq!(&compute_signature(&original, &key), &signature);
        prop_assert_eq!(verify_signature(&original, &key, &signature), SignatureCheck::Valid);

        let tampered_amount = request(&merchant_id, &acquirer_id, &order_id, minor + 1);
        prop_assert_eq!(
            verify_signature(&tampered_amount, &key, &signature),
            SignatureCheck::Mismatch
        );

        let tampered_order = request(&merchant_id, &acquirer_id, &format!("{}X", order_id), minor);
        prop_assert_eq!(
            verify_signature(&tampered_order, &key, &signature),
            SignatureCheck::Mismatch
        );

        let other_key = TransactionSecret::new(format!("{}!", secret)).unwrap();
        prop_assert_eq!(
            verify_signature(&original, &other_key, &signature),
            SignatureCheck::Mismatch
        );
    }

    #[test]
    fn any_response_code_is_interpreted(code in "\\PC{0,8}") {
        let response: GatewayResponse = [
            ("ResponseCode", code.as_str()),
            ("OrderID", "ORD100"),
            ("ReasonCode", "0"),
            ("ReasonCodeDesc", "n/a"),
        ]
        .into_iter()
        .collect();
        let result = interpret_response(&response).unwrap();
        prop_assert_eq!(&result.response_code, &code);
        prop_assert_eq!(result.response_description, result.outcome.description());
    }

    #[test]
    fn zero_padded_success_code_is_success(zeros in 0usize..6) {
        let code = format!("{}1", "0".repeat(zeros));
        let response: GatewayResponse = [
            ("ResponseCode", code.as_str()),
            ("OrderID", "ORD100"),
            ("ReasonCode", "1"),
            ("ReasonCodeDesc", "Approved"),
        ]
        .into_iter()
        .collect();
        prop_assert_eq!(interpret_response(&response).unwrap().outcome, Outcome::Success);
    }
}
