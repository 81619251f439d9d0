//! Chester: encrypted, signed, time-limited tokens.
//!
//! A [`Chester`] locks a string (the *treasure*) into an opaque URL-safe
//! token (the *chest*). Unlocking verifies that the chest was produced by an
//! instance with the same secret and name, that it is bound to the same
//! ordered list of context strings, and that it is neither from the future
//! nor older than the configured maximum age.
//!
//! # Layers
//!
//! - [`Crypter`]: confidentiality. AES-256-CBC under `SHA-256(secret || name)`
//!   with a random IV per token.
//! - [`Chester`]: authenticity and freshness. HMAC-MD5 over the payload,
//!   timestamp and contexts, checked in constant time.
//!
//! # Determinism
//!
//! Time and randomness come from an [`Environment`]. Production code uses
//! [`SystemEnv`]; tests substitute a seeded, virtual-clock implementation.
//!
//! # Logging
//!
//! Construction and rejected chests are logged at `debug`, successful locks
//! and unlocks at `trace`. Secrets, treasures and chests are never logged.

#![forbid(unsafe_code)]

mod chester;
pub mod config;
mod crypter;
pub mod encoding;
pub mod env;
pub mod error;
mod object;
mod secret;

pub use chester::{Chester, LockOptions, UnlockOptions};
pub use chester_crypto::{Cipher, CompressionMode};
pub use chester_proto::codec;
pub use config::{ChesterConfig, CrypterConfig};
pub use crypter::Crypter;
pub use encoding::{Encoding, EncodingError};
pub use env::{Environment, SystemEnv};
pub use error::{ChesterError, CrypterError, ErrorKind};
pub use secret::Secret;
