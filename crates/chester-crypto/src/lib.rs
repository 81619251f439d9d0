//! Chester Cryptographic Primitives
//!
//! Building blocks for sealing and opening chest tokens. Pure functions with
//! deterministic outputs: callers provide the IV bytes, so every function here
//! can be tested against fixed vectors.
//!
//! # Pipeline
//!
//! ```text
//! secret || name ──SHA-256──► DerivedKey
//!
//! payload ──gzip?──► payload' ──HMAC-MD5(secret, payload' || ts || ctx..)──► signature
//!
//! signature || ts || payload' ──AES-256-CBC(DerivedKey, IV)──► ciphertext
//! ```
//!
//! # Security
//!
//! Authenticity:
//! - The HMAC signature is the authority on whether a token is genuine
//! - CBC padding validation is not an authenticity check: a wrong key can
//!   occasionally decrypt to garbage without error
//! - Signatures are compared in constant time
//!
//! Key handling:
//! - Derived keys are zeroized on drop
//! - SHA-256 only fits the secret to the cipher's key length; it is not a
//!   password-hardening KDF, so secrets must already carry full entropy

#![forbid(unsafe_code)]

pub mod cipher;
pub mod compression;
pub mod error;
pub mod key;
pub mod signature;

pub use cipher::{Cipher, decrypt, encrypt};
pub use compression::{Compressed, CompressionLevel, CompressionMode, compress, gunzip, gzip};
pub use error::CryptoError;
pub use key::{DerivedKey, KEY_SIZE, derive_key};
pub use signature::{SIGNATURE_SIZE, compute_signature, signatures_match};
