//! Error types for cryptographic primitives

use thiserror::Error;

/// Errors from cipher, compression and parameter parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// IV does not match the cipher's IV length
    #[error("invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength {
        /// Cipher IV length
        expected: usize,
        /// Provided IV length
        actual: usize,
    },

    /// Ciphertext is empty or not a whole number of blocks
    #[error("invalid ciphertext length {len}: must be a non-zero multiple of {block_size}")]
    InvalidCiphertextLength {
        /// Ciphertext length
        len: usize,
        /// Cipher block size
        block_size: usize,
    },

    /// Decrypted block padding was malformed (wrong key, IV or corrupted data)
    #[error("bad decrypt: padding check failed")]
    BadPadding,

    /// Unrecognized cipher name
    #[error("unknown cipher: {name}")]
    UnknownCipher {
        /// Name that failed to parse
        name: String,
    },

    /// Unrecognized compression mode name
    #[error("unknown compression mode: {name}")]
    UnknownCompressionMode {
        /// Name that failed to parse
        name: String,
    },

    /// Compression level outside 0..=9
    #[error("invalid compression level {level}: must be between 0 and 9")]
    InvalidCompressionLevel {
        /// Rejected level
        level: u32,
    },

    /// Payload was flagged as compressed but is not a valid gzip stream
    #[error("decompression failed: {reason}")]
    Decompression {
        /// Underlying reason
        reason: String,
    },
}

impl CryptoError {
    /// Returns true if this error came from parsing or validating parameters
    /// rather than from processing data.
    pub fn is_parameter_error(&self) -> bool {
        match self {
            Self::UnknownCipher { .. }
            | Self::UnknownCompressionMode { .. }
            | Self::InvalidCompressionLevel { .. } => true,

            Self::InvalidIvLength { .. }
            | Self::InvalidCiphertextLength { .. }
            | Self::BadPadding
            | Self::Decompression { .. } => false,
        }
    }
}
