//! Keyed signatures using HMAC-MD5
//!
//! The signature covers the payload, the timestamp and every context string,
//! fed to the MAC in that order with no separators. Contexts are therefore
//! order-sensitive: `[a, b]` and `[b, a]` produce different signatures.

use hmac::{Hmac, Mac};
use md5::Md5;
use subtle::ConstantTimeEq;

type HmacMd5 = Hmac<Md5>;

/// Size of a signature (16 bytes)
pub const SIGNATURE_SIZE: usize = 16;

/// Compute `HMAC-MD5(key, payload || timestamp || contexts[0] || ...)`.
pub fn compute_signature<C: AsRef<[u8]>>(
    key: &[u8],
    payload: &[u8],
    timestamp: &[u8],
    contexts: &[C],
) -> [u8; SIGNATURE_SIZE] {
    let Ok(mut mac) = HmacMd5::new_from_slice(key) else {
        unreachable!("HMAC accepts keys of any length");
    };

    mac.update(payload);
    mac.update(timestamp);
    for context in contexts {
        mac.update(context.as_ref());
    }

    mac.finalize().into_bytes().into()
}

/// Compare two signatures in constant time.
pub fn signatures_match(stored: &[u8; SIGNATURE_SIZE], computed: &[u8; SIGNATURE_SIZE]) -> bool {
    stored[..].ct_eq(&computed[..]).into()
}
