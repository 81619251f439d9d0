//! Symmetric encryption of byte buffers into URL-safe tokens.
//!
//! # Token layout
//!
//! ```text
//! codec( IV || cipher(key, plaintext) )
//! ```
//!
//! When the Crypter may compress (`Auto` or `Force`), bit 0 of the first IV
//! byte records whether `plaintext` is a gzip stream. With `Never` the IV is
//! left fully random and decryption returns the plaintext as-is, so tokens
//! from compression-unaware producers decrypt regardless of IV parity.
//!
//! A Crypter provides confidentiality only. Decryption under the wrong key
//! occasionally "succeeds" with garbage; authenticate the output before
//! trusting it.

use std::fmt;

use chester_crypto::{
    Compressed, CompressionLevel, CompressionMode, DerivedKey, compress, decrypt, derive_key,
    encrypt, gunzip,
};
use chester_proto::codec;

use crate::{
    config::CrypterConfig,
    env::{Environment, SystemEnv},
    error::CrypterError,
};

/// Compression flag in the first IV byte.
const IV_COMPRESSED_BIT: u8 = 0x01;

/// Encrypts buffers into tokens and back.
///
/// Immutable after construction and safe to share across threads.
pub struct Crypter<E: Environment = SystemEnv> {
    key: DerivedKey,
    config: CrypterConfig,
    level: CompressionLevel,
    env: E,
}

impl<E: Environment> fmt::Debug for Crypter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crypter").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Crypter<SystemEnv> {
    /// Create a Crypter using system randomness.
    ///
    /// The cipher key is SHA-256 of `secret`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` listing every invalid option
    pub fn new(secret: &[u8], config: CrypterConfig) -> Result<Self, CrypterError> {
        Self::with_env(secret, config, SystemEnv)
    }
}

impl<E: Environment> Crypter<E> {
    /// Create a Crypter drawing IVs from `env`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` listing every invalid option
    pub fn with_env(secret: &[u8], config: CrypterConfig, env: E) -> Result<Self, CrypterError> {
        let mut problems = config.problems();
        if secret.is_empty() {
            problems.insert(0, "secret must not be empty".to_string());
        }
        match CompressionLevel::new(config.compression_level) {
            Ok(level) if problems.is_empty() => {
                Ok(Self { key: derive_key(secret), config, level, env })
            },
            _ => Err(CrypterError::InvalidConfig { problems }),
        }
    }

    /// Options this Crypter was built with.
    pub fn config(&self) -> &CrypterConfig {
        &self.config
    }

    /// Encrypt `buffer` under a fresh random IV.
    ///
    /// Two calls with the same input produce different tokens.
    pub fn encrypt(&self, buffer: &[u8]) -> String {
        let Compressed { bytes, compressed } =
            compress(self.config.compression, self.level, buffer);

        let mut iv = vec![0u8; self.config.iv_length];
        self.env.random_bytes(&mut iv);
        if let Some(first) = iv.first_mut()
            && self.uses_iv_flag()
        {
            if compressed {
                *first |= IV_COMPRESSED_BIT;
            } else {
                *first &= !IV_COMPRESSED_BIT;
            }
        }

        let Ok(ciphertext) = encrypt(self.config.cipher, &self.key, &iv, &bytes) else {
            unreachable!("IV length is validated at construction");
        };

        let mut raw = iv;
        raw.extend_from_slice(&ciphertext);
        codec::encode(&raw)
    }

    /// Decrypt a token produced by [`Crypter::encrypt`].
    ///
    /// # Errors
    ///
    /// - `Codec` if the token is not valid URL-safe base64
    /// - `TooShort` if the token holds no ciphertext after the IV
    /// - `Cipher` if the ciphertext is misaligned or its padding is bad
    /// - `Decompression` if the IV flags compression but the plaintext is
    ///   not gzip (only when the compression mode is not `Never`)
    pub fn decrypt(&self, token: &str) -> Result<Vec<u8>, CrypterError> {
        let raw = codec::decode(token)?;

        let iv_len = self.config.iv_length;
        if raw.len() <= iv_len {
            return Err(CrypterError::TooShort { iv_len, actual: raw.len() });
        }

        let (iv, ciphertext) = raw.split_at(iv_len);
        let plaintext =
            decrypt(self.config.cipher, &self.key, iv, ciphertext).map_err(CrypterError::Cipher)?;

        if !self.uses_iv_flag() || iv[0] & IV_COMPRESSED_BIT == 0 {
            return Ok(plaintext);
        }
        gunzip(&plaintext).map_err(CrypterError::Decompression)
    }

    /// Whether the IV carries the compression flag.
    fn uses_iv_flag(&self) -> bool {
        self.config.compression != CompressionMode::Never
    }
}
