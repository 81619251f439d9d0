//! Error types for Crypter and Chester.
//!
//! `CrypterError` describes why a token could not be turned back into bytes.
//! `ChesterError` is what callers of `lock`/`unlock` see; every variant maps
//! to exactly one [`ErrorKind`] so callers can branch without matching on
//! variant details.

use chester_crypto::CryptoError;
use chester_proto::ProtocolError;
use thiserror::Error;

use crate::encoding::EncodingError;

/// Errors from the low-level [`Crypter`](crate::Crypter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrypterError {
    /// One or more configuration options are invalid
    #[error("invalid crypter configuration: {}", .problems.join("; "))]
    InvalidConfig {
        /// Every problem found, in option order
        problems: Vec<String>,
    },

    /// Token is not valid URL-safe base64
    #[error("malformed token: {0}")]
    Codec(#[from] ProtocolError),

    /// Token carries no ciphertext after the IV
    #[error("token too short: {actual} bytes, need more than the {iv_len}-byte IV")]
    TooShort {
        /// Configured IV length
        iv_len: usize,
        /// Decoded token length
        actual: usize,
    },

    /// Ciphertext rejected by the cipher
    #[error("decryption failed: {0}")]
    Cipher(#[source] CryptoError),

    /// Compressed plaintext is not a valid gzip stream
    #[error("decompression failed: {0}")]
    Decompression(#[source] CryptoError),
}

/// Coarse classification of [`ChesterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad configuration or argument
    Validation,
    /// Chest could not be decoded or decrypted
    Integrity,
    /// Signature did not verify
    Signature,
    /// Chest timestamp is in the future
    TimeTravel,
    /// Chest is older than the maximum age
    Expired,
    /// Signed payload is not a valid gzip stream
    Decompression,
    /// Treasure could not be serialized to JSON
    Serialization,
    /// Unlocked treasure is not valid JSON for the target type
    Deserialization,
}

/// Errors from [`Chester`](crate::Chester).
#[derive(Error, Debug)]
pub enum ChesterError {
    /// One or more configuration options are invalid
    #[error("invalid configuration: {}", .problems.join("; "))]
    InvalidConfig {
        /// Every problem found, in option order
        problems: Vec<String>,
    },

    /// Treasure or context cannot be represented in the configured encoding
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Argument has the wrong shape
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong
        reason: String,
    },

    /// Current time does not fit in a chest timestamp
    #[error("clock out of range: {now}s is not within u32 seconds after zero time {zero_time}s")]
    TimestampOutOfRange {
        /// Wall clock at lock time
        now: u64,
        /// Configured zero time
        zero_time: u64,
    },

    /// Chest could not be decoded or decrypted
    #[error("chest integrity check failed: {0}")]
    Integrity(#[source] CrypterError),

    /// Signature did not verify
    #[error("chest signature mismatch")]
    Signature,

    /// Chest timestamp is ahead of the current time
    #[error("chest is from the future: {ahead_secs}s ahead")]
    TimeTravel {
        /// How far ahead the chest's timestamp is
        ahead_secs: u64,
    },

    /// Chest is older than allowed
    #[error("chest expired: {age_secs}s old, limit is {max_age_secs}s")]
    Expired {
        /// Chest age
        age_secs: u64,
        /// Configured maximum
        max_age_secs: u64,
    },

    /// Signed payload failed to decompress
    #[error("chest decompression failed: {0}")]
    Decompression(#[source] CryptoError),

    /// Treasure could not be serialized
    #[error("treasure serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Unlocked treasure could not be deserialized
    #[error("treasure deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ChesterError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. }
            | Self::Encoding(_)
            | Self::InvalidArgument { .. }
            | Self::TimestampOutOfRange { .. } => ErrorKind::Validation,
            Self::Integrity(_) => ErrorKind::Integrity,
            Self::Signature => ErrorKind::Signature,
            Self::TimeTravel { .. } => ErrorKind::TimeTravel,
            Self::Expired { .. } => ErrorKind::Expired,
            Self::Decompression(_) => ErrorKind::Decompression,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Deserialization(_) => ErrorKind::Deserialization,
        }
    }

    /// Returns true if the error arose while producing a chest.
    pub fn is_encryption(&self) -> bool {
        matches!(self.kind(), ErrorKind::Serialization)
    }

    /// Returns true if the error arose while opening a chest.
    ///
    /// Any of these means the chest must not be trusted. Callers that only
    /// care about "valid or not" can treat them all alike.
    pub fn is_decryption(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Integrity
                | ErrorKind::Signature
                | ErrorKind::TimeTravel
                | ErrorKind::Expired
                | ErrorKind::Decompression
                | ErrorKind::Deserialization
        )
    }
}
