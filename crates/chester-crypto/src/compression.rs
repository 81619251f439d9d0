//! Payload compression using gzip (RFC 1952)

use std::{
    fmt,
    io::{Read, Write},
    str::FromStr,
};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};

use crate::error::CryptoError;

/// gzip member header magic
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// 10-byte header plus 8-byte trailer
const GZIP_MIN_LEN: usize = 18;

/// When to compress a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionMode {
    /// Compress, but keep the result only if strictly shorter
    #[default]
    Auto,
    /// Always use the compressed form
    Force,
    /// Never compress
    Never,
}

impl CompressionMode {
    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Force => "FORCE",
            Self::Never => "NEVER",
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionMode {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTO" => Ok(Self::Auto),
            "FORCE" => Ok(Self::Force),
            "NEVER" => Ok(Self::Never),
            _ => Err(CryptoError::UnknownCompressionMode { name: s.to_string() }),
        }
    }
}

/// gzip level between 0 (store) and 9 (best ratio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Maximum ratio (level 9)
    pub const BEST: Self = Self(9);

    /// Validate a raw level.
    pub fn new(level: u32) -> Result<Self, CryptoError> {
        if level <= Self::BEST.0 {
            Ok(Self(level))
        } else {
            Err(CryptoError::InvalidCompressionLevel { level })
        }
    }

    /// Raw level.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::BEST
    }
}

/// Outcome of a compression decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    /// Bytes to transmit
    pub bytes: Vec<u8>,
    /// Whether `bytes` is a gzip stream
    pub compressed: bool,
}

/// Apply the compression policy to `data`.
///
/// `Force` always returns the gzip stream. `Auto` returns it only when it is
/// strictly shorter than the input, so short or high-entropy payloads pass
/// through unchanged. `Never` does no work.
pub fn compress(mode: CompressionMode, level: CompressionLevel, data: &[u8]) -> Compressed {
    if mode == CompressionMode::Never {
        return Compressed { bytes: data.to_vec(), compressed: false };
    }

    let zipped = gzip(level, data);
    if mode == CompressionMode::Force || zipped.len() < data.len() {
        Compressed { bytes: zipped, compressed: true }
    } else {
        Compressed { bytes: data.to_vec(), compressed: false }
    }
}

/// gzip `data` at `level`.
pub fn gzip(level: CompressionLevel, data: &[u8]) -> Vec<u8> {
    let buf = Vec::with_capacity(data.len() / 2 + GZIP_MIN_LEN);
    let mut encoder = GzEncoder::new(buf, Compression::new(level.get()));

    let Ok(()) = encoder.write_all(data) else {
        unreachable!("in-memory gzip write is infallible");
    };
    let Ok(zipped) = encoder.finish() else {
        unreachable!("in-memory gzip finish is infallible");
    };

    zipped
}

/// Decompress a single gzip member.
///
/// # Errors
///
/// - `Decompression` if `data` is not a complete, valid gzip stream
pub fn gunzip(data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < GZIP_MIN_LEN || data[..2] != GZIP_MAGIC {
        return Err(CryptoError::Decompression { reason: "incorrect header check".to_string() });
    }

    let mut out = Vec::with_capacity(data.len() * 2);
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| CryptoError::Decompression { reason: e.to_string() })?;

    Ok(out)
}
