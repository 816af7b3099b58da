//! # Digest & Encoding
//!
//! The gateway authenticates messages with a single construction:
//! `base64(SHA-1(field_1 || field_2 || ... || field_n))`. This module owns
//! both halves of it, the digest and the text encoding, so nothing else in
//! the crate touches `sha1` or `base64` directly.
//!
//! SHA-1 is not our choice. It is what the gateway speaks, and the signature
//! here is a keyed integrity check over short structured input rather than a
//! collision-resistant commitment over attacker-chosen documents. If the
//! gateway ever grows a second method, it goes next to this one and
//! [`crate::request::types::SignatureMethod`] grows a variant.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha1::{Digest, Sha1};

use crate::config::DIGEST_LENGTH;

/// SHA-1 over several byte slices fed in order.
///
/// Equivalent to hashing their concatenation, without allocating the
/// concatenated buffer. The signing path relies on this so the secret is
/// never copied into a longer-lived payload string.
pub fn sha1_multi(parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; DIGEST_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// Standard (padded) base64 of a digest, as sent in the `Signature` field.
pub fn encode_signature(digest: &[u8; DIGEST_LENGTH]) -> String {
    STANDARD.encode(digest)
}

/// Decodes a `Signature` field back into digest bytes.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is
/// not valid base64 of exactly [`DIGEST_LENGTH`] bytes.
pub fn decode_signature(signature: &str) -> Option<[u8; DIGEST_LENGTH]> {
    let bytes = STANDARD.decode(signature.trim()).ok()?;
    if bytes.len() != DIGEST_LENGTH {
        return None;
    }
    let mut output = [0u8; DIGEST_LENGTH];
    output.copy_from_slice(&bytes);
    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SIGNATURE_LENGTH;

    fn sha1(data: &[u8]) -> [u8; DIGEST_LENGTH] {
        sha1_multi(&[data])
    }

    #[test]
    fn sha1_known_answer() {
        // FIPS 180 test vector.
        let digest = sha1(b"abc");
        assert_eq!(
            encode_signature(&digest),
            "qZk+NkcGgWq6PiVxeFDCbJzQ2J0="
        );
    }

    #[test]
    fn multi_part_equals_concatenation() {
        let whole = sha1(b"s3cretM1A1ORD100000000012550462");
        let parts: [&[u8]; 6] = [
            b"s3cret",
            b"M1",
            b"A1",
            b"ORD100",
            b"000000012550",
            b"462",
        ];
        assert_eq!(whole, sha1_multi(&parts));
    }

    #[test]
    fn encoded_signature_has_fixed_length() {
        let sig = encode_signature(&sha1(b"anything"));
        assert_eq!(sig.len(), SIGNATURE_LENGTH);
        assert!(sig.ends_with('='));
    }

    #[test]
    fn decode_round_trips_and_trims() {
        let digest = sha1(b"payload");
        let encoded = format!("  {}\n", encode_signature(&digest));
        assert_eq!(decode_signature(&encoded), Some(digest));
    }

    #[test]
    fn decode_rejects_wrong_length_and_garbage() {
        assert_eq!(decode_signature(""), None);
        assert_eq!(decode_signature("not base64!"), None);
        // 16 bytes of valid base64.
        assert_eq!(decode_signature("AAAAAAAAAAAAAAAAAAAAAA=="), None);
    }
}
