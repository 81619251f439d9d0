//! URL-safe base64 codec.
//!
//! Standard base64 with `+` replaced by `-` and `/` by `_`. The `=` padding
//! (zero, one or two characters) is dropped and a single ASCII digit holding
//! the padding count is appended instead, so every encoding ends in `0`, `1`
//! or `2` and the output needs no escaping in URLs or cookies.
//!
//! ```text
//! "f"   -> Zg==  -> Zg2
//! "fo"  -> Zm8=  -> Zm81
//! "foo" -> Zm9v  -> Zm9v0
//! ```

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::errors::{ProtocolError, Result};

/// Encode bytes into the URL-safe alphabet with a trailing padding digit.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = URL_SAFE_NO_PAD.encode(bytes);
    out.push(char::from(b'0' + padding_for_input(bytes.len())));
    out
}

/// Decode text produced by [`encode`].
///
/// # Errors
///
/// - `EmptyToken` for empty input
/// - `InvalidPaddingMarker` if the last character is not `0`, `1` or `2`
/// - `InvalidLength` / `PaddingMismatch` if the marker disagrees with the body
/// - `Base64` for characters outside the alphabet
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let Some((marker_at, marker)) = text.char_indices().next_back() else {
        return Err(ProtocolError::EmptyToken);
    };

    let padding = match marker {
        '0' => 0,
        '1' => 1,
        '2' => 2,
        found => return Err(ProtocolError::InvalidPaddingMarker { found }),
    };

    let body = &text[..marker_at];
    let expected = padding_for_body(body.len())?;
    if padding != expected {
        return Err(ProtocolError::PaddingMismatch { marker: padding, expected });
    }

    Ok(URL_SAFE_NO_PAD.decode(body)?)
}

/// Number of `=` characters standard base64 appends for `len` input bytes.
fn padding_for_input(len: usize) -> u8 {
    match len % 3 {
        0 => 0,
        1 => 2,
        _ => 1,
    }
}

/// Number of `=` characters that were stripped from an unpadded body.
fn padding_for_body(len: usize) -> Result<u8> {
    match len % 4 {
        0 => Ok(0),
        2 => Ok(2),
        3 => Ok(1),
        _ => Err(ProtocolError::InvalidLength { len }),
    }
}
