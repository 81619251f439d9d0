//! Key derivation using SHA-256

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Size of a derived cipher key (32 bytes)
pub const KEY_SIZE: usize = 32;

/// Fixed-length cipher key derived from secret material.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Derive a 32-byte key from arbitrary secret material.
///
/// Deterministic: the same material always yields the same key. Any
/// difference in the material (including a different namespace suffix)
/// yields an unrelated key.
pub fn derive_key(material: &[u8]) -> DerivedKey {
    DerivedKey { key: Sha256::digest(material).into() }
}
