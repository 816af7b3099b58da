//! Constant-time equality for authentication tags.
//!
//! A plain `==` on signatures returns as soon as one byte differs, which
//! lets a caller with a good clock recover the expected signature byte by
//! byte. Every comparison of a received signature goes through here.

use subtle::ConstantTimeEq;

/// Compares two byte strings without data-dependent early exit.
///
/// Lengths are compared first and are not secret: gateway digests are
/// always 20 bytes, so a length mismatch reveals nothing about the content.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
