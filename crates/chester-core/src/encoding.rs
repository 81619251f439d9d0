//! Text encodings for treasures, contexts, secrets and names.
//!
//! Encoding is strict: a character that the encoding cannot represent is an
//! error rather than a silent substitution. Decoding never fails, since the
//! bytes being decoded have already passed signature verification.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors from converting text to or from an [`Encoding`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Encoding name not recognised
    #[error("unknown encoding: {name:?} (expected utf8, ascii, latin1 or binary)")]
    Unknown {
        /// Name that was supplied
        name: String,
    },

    /// Text contains a character outside the encoding's range
    #[error("character {ch:?} at byte {index} is not representable in {encoding}")]
    Unrepresentable {
        /// Offending character
        ch: char,
        /// Byte offset in the source string
        index: usize,
        /// Encoding that rejected it
        encoding: Encoding,
    },
}

/// How text maps to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8
    #[default]
    Utf8,
    /// 7-bit ASCII
    Ascii,
    /// ISO-8859-1, one byte per code point up to U+00FF
    Latin1,
    /// Alias of [`Encoding::Latin1`]
    Binary,
}

impl Encoding {
    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Binary => "binary",
        }
    }

    /// Highest code point a single byte can carry, or `None` for UTF-8.
    const fn max_code_point(self) -> Option<u32> {
        match self {
            Self::Utf8 => None,
            Self::Ascii => Some(0x7F),
            Self::Latin1 | Self::Binary => Some(0xFF),
        }
    }

    /// Convert `text` to bytes.
    ///
    /// # Errors
    ///
    /// - `Unrepresentable` if `text` contains a character above the encoding's
    ///   range
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        let Some(max) = self.max_code_point() else {
            return Ok(text.as_bytes().to_vec());
        };

        text.char_indices()
            .map(|(index, ch)| match u8::try_from(u32::from(ch)) {
                Ok(byte) if u32::from(byte) <= max => Ok(byte),
                _ => Err(EncodingError::Unrepresentable { ch, index, encoding: self }),
            })
            .collect()
    }

    /// Convert `bytes` to text.
    ///
    /// UTF-8 replaces invalid sequences with U+FFFD. ASCII drops the high bit
    /// of each byte. Latin-1 maps each byte to the code point of equal value.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Ascii => bytes.iter().map(|&b| char::from(b & 0x7F)).collect(),
            Self::Latin1 | Self::Binary => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utf8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "latin1" => Ok(Self::Latin1),
            "binary" => Ok(Self::Binary),
            _ => Err(EncodingError::Unknown { name: s.to_string() }),
        }
    }
}
