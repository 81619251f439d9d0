//! Fuzz target for the token codec and inner frame parser
//!
//! # Invariants
//!
//! - `codec::decode` never panics on arbitrary text
//! - Anything that decodes re-encodes to the same text
//! - `InnerFrame::decode` never panics and round-trips what it accepts

#![no_main]

use chester_proto::{InnerFrame, codec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(bytes) = codec::decode(text)
    {
        assert_eq!(codec::encode(&bytes), text, "codec accepted a non-canonical token");
    }

    if let Ok(frame) = InnerFrame::decode(data) {
        assert_eq!(frame.to_vec(), data);
    }
});
