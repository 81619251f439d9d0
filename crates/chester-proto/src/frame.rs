//! Inner frame: the plaintext that gets encrypted into a chest.
//!
//! Layout:
//! `[signature: 16 bytes] + [timestamp: 4 bytes, BE] + [payload: variable]`
//!
//! Bit 0 of the first signature byte is not part of the MAC: it records
//! whether the payload was compressed before signing. See
//! [`compressed_flag`] and [`set_compressed_flag`].

use bytes::{BufMut, Bytes};

use crate::errors::{ProtocolError, Result};

/// Size of the HMAC signature (16 bytes)
pub const SIGNATURE_SIZE: usize = 16;

/// Size of the big-endian timestamp (4 bytes)
pub const TIMESTAMP_SIZE: usize = 4;

const COMPRESSED_BIT: u8 = 0x01;

/// Decoded inner frame.
///
/// # Security
///
/// Decoding only checks that the buffer is long enough to hold the fixed
/// header. The signature must be recomputed and compared by the caller before
/// the payload or timestamp are trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerFrame {
    /// Signature with the compression flag in bit 0 of byte 0
    pub signature: [u8; SIGNATURE_SIZE],

    /// Seconds since the issuer's zero time
    pub timestamp: u32,

    /// Payload bytes (compressed if the flag is set)
    pub payload: Bytes,
}

impl InnerFrame {
    /// Size of the fixed header preceding the payload (20 bytes)
    pub const HEADER_SIZE: usize = SIGNATURE_SIZE + TIMESTAMP_SIZE;

    /// Create a frame from its parts.
    #[must_use]
    pub fn new(signature: [u8; SIGNATURE_SIZE], timestamp: u32, payload: impl Into<Bytes>) -> Self {
        Self { signature, timestamp, payload: payload.into() }
    }

    /// Timestamp in wire order.
    pub fn timestamp_bytes(&self) -> [u8; TIMESTAMP_SIZE] {
        self.timestamp.to_be_bytes()
    }

    /// Whether the payload was compressed by the issuer.
    pub fn is_compressed(&self) -> bool {
        compressed_flag(&self.signature)
    }

    /// Total encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }

    /// Write the frame into `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.signature);
        dst.put_u32(self.timestamp);
        dst.put_slice(&self.payload);
    }

    /// Encode into a freshly allocated buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf
    }

    /// Split decrypted bytes into signature, timestamp and payload.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooShort` if fewer than 20 bytes are given
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::HEADER_SIZE {
            return Err(ProtocolError::FrameTooShort {
                expected: Self::HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let (signature_bytes, rest) = bytes.split_at(SIGNATURE_SIZE);
        let (timestamp_bytes, payload) = rest.split_at(TIMESTAMP_SIZE);

        let mut signature = [0u8; SIGNATURE_SIZE];
        signature.copy_from_slice(signature_bytes);

        let mut timestamp = [0u8; TIMESTAMP_SIZE];
        timestamp.copy_from_slice(timestamp_bytes);

        Ok(Self {
            signature,
            timestamp: u32::from_be_bytes(timestamp),
            payload: Bytes::copy_from_slice(payload),
        })
    }
}

/// Read the compression flag from a signature.
pub fn compressed_flag(signature: &[u8; SIGNATURE_SIZE]) -> bool {
    signature[0] & COMPRESSED_BIT != 0
}

/// Overwrite the compression flag in a signature.
pub fn set_compressed_flag(signature: &mut [u8; SIGNATURE_SIZE], compressed: bool) {
    if compressed {
        signature[0] |= COMPRESSED_BIT;
    } else {
        signature[0] &= !COMPRESSED_BIT;
    }
}
