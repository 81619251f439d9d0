//! Chester wire format.
//!
//! Two layers make up the bytes of a chest token:
//!
//! ```text
//! chest      := codec::encode( IV || CipherText )
//! CipherText := encrypt( InnerFrame )
//! InnerFrame := Signature[16] || Timestamp[4, BE] || Payload
//! ```
//!
//! This crate owns the outer text codec ([`codec`]) and the plaintext layout
//! that gets encrypted ([`frame`]). It performs no cryptography: frames are
//! structurally valid after decoding, not authenticated.

#![forbid(unsafe_code)]

pub mod codec;
pub mod errors;
pub mod frame;

pub use errors::{ProtocolError, Result};
pub use frame::{InnerFrame, SIGNATURE_SIZE, TIMESTAMP_SIZE};
