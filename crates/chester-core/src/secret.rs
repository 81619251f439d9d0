//! Shared secret held by a `Chester`.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::encoding::{Encoding, EncodingError};

/// Secret supplied as text or as raw bytes.
///
/// Text secrets are encoded with the instance's [`Encoding`] when deriving
/// the cipher key and as UTF-8 when keying the signature. Byte secrets are
/// used as-is for both. Contents are wiped on drop and never printed.
#[derive(Clone)]
pub enum Secret {
    /// Text secret
    Text(String),
    /// Raw byte secret
    Bytes(Vec<u8>),
}

impl Secret {
    /// True if the secret has no bytes.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Bytes(bytes) => bytes.is_empty(),
        }
    }

    /// Key for the signature MAC.
    pub(crate) fn mac_key(&self) -> Zeroizing<Vec<u8>> {
        match self {
            Self::Text(text) => Zeroizing::new(text.as_bytes().to_vec()),
            Self::Bytes(bytes) => Zeroizing::new(bytes.clone()),
        }
    }

    /// Secret bytes for cipher key derivation.
    pub(crate) fn encoded(&self, encoding: Encoding) -> Result<Zeroizing<Vec<u8>>, EncodingError> {
        match self {
            Self::Text(text) => encoding.encode(text).map(Zeroizing::new),
            Self::Bytes(bytes) => Ok(Zeroizing::new(bytes.clone())),
        }
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        match self {
            Self::Text(text) => text.zeroize(),
            Self::Bytes(bytes) => bytes.zeroize(),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(_) => f.write_str("Secret::Text([REDACTED])"),
            Self::Bytes(_) => f.write_str("Secret::Bytes([REDACTED])"),
        }
    }
}

impl From<&str> for Secret {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Secret {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Secret {
    fn from(bytes: &[u8; N]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
