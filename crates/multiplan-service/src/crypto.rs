//! Cryptographic helpers for webhook signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 over a sequence of byte chunks and return it hex-encoded.
///
/// The chunks are fed to the MAC in order, so `["123", ".", body]` signs the
/// concatenation without building an intermediate buffer.
#[must_use]
pub fn hmac_sha256_hex(secret: &[u8], chunks: &[&[u8]]) -> String {
    hex::encode(mac_over(secret, chunks).finalize().into_bytes())
}

/// Check a hex-encoded HMAC-SHA256 tag against the chunks it claims to sign.
///
/// The comparison is constant-time (`Mac::verify_slice`). Tags that are not
/// valid hex are rejected.
#[must_use]
pub fn verify_hmac_sha256_hex(secret: &[u8], chunks: &[&[u8]], tag_hex: &str) -> bool {
    let Ok(tag) = hex::decode(tag_hex) else {
        return false;
    };

    mac_over(secret, chunks).verify_slice(&tag).is_ok()
}

/// HMAC-SHA256 keyed with `secret` after absorbing `chunks`.
fn mac_over(secret: &[u8], chunks: &[&[u8]]) -> HmacSha256 {
    // INVARIANT: HMAC accepts keys of any length, so `new_from_slice` cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts any key size");
    for chunk in chunks {
        mac.update(chunk);
    }
    mac
}
