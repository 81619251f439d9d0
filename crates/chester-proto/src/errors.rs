//! Error types for wire-format decoding.

use thiserror::Error;

/// Result alias for wire-format operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while decoding chest text or inner frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Token text was empty (a valid encoding is at least one character)
    #[error("empty token")]
    EmptyToken,

    /// Last character was not a padding digit
    #[error("invalid padding marker: expected '0', '1' or '2', found {found:?}")]
    InvalidPaddingMarker {
        /// The character found in the marker position
        found: char,
    },

    /// Padding digit disagrees with the body length
    #[error("padding marker {marker} does not match body length (expected {expected})")]
    PaddingMismatch {
        /// Padding count carried by the marker
        marker: u8,
        /// Padding count implied by the body length
        expected: u8,
    },

    /// Body length can never be produced by the encoder
    #[error("invalid encoded length: {len}")]
    InvalidLength {
        /// Body length in bytes (excluding the marker)
        len: usize,
    },

    /// Body contained characters outside the alphabet or non-canonical bits
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Buffer too short to hold a frame header
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Minimum size
        expected: usize,
        /// Actual size
        actual: usize,
    },
}
