//! Locking strings into signed, timestamped, encrypted chests.
//!
//! # Chest layout
//!
//! ```text
//! chest = Crypter( signature[16] || timestamp[4, BE] || payload )
//! signature = HMAC-MD5(secret, payload || timestamp || context...)
//! ```
//!
//! `timestamp` counts seconds since the configured zero time. Bit 0 of the
//! first signature byte is overwritten with the payload's compression flag
//! and is excluded from verification.
//!
//! # Unlock order
//!
//! 1. Decode and decrypt (any failure is `Integrity`)
//! 2. Verify the signature against the supplied contexts
//! 3. Reject future timestamps, then (if expiry is on) old ones
//! 4. Decompress, then decode text
//!
//! Nothing about the payload is trusted before step 2 succeeds.

use std::fmt;

use chester_crypto::{
    Compressed, CompressionLevel, compress, compute_signature, gunzip, signatures_match,
};
use chester_proto::{InnerFrame, frame::set_compressed_flag};
use zeroize::Zeroizing;

use crate::{
    config::ChesterConfig,
    crypter::Crypter,
    env::{Environment, SystemEnv},
    error::ChesterError,
    secret::Secret,
};

/// Options for [`Chester::lock`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockOptions {
    /// Strings the chest is bound to, in order
    pub contexts: Vec<String>,
}

impl LockOptions {
    /// Bind the chest to `contexts`.
    pub fn with_contexts<I, S>(contexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { contexts: contexts.into_iter().map(Into::into).collect() }
    }
}

/// Options for [`Chester::unlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockOptions {
    /// Strings the chest must be bound to, in the order used at lock time
    pub contexts: Vec<String>,
    /// Reject chests older than the maximum age
    pub expire: bool,
}

impl Default for UnlockOptions {
    fn default() -> Self {
        Self { contexts: Vec::new(), expire: true }
    }
}

impl UnlockOptions {
    /// Require `contexts`, with expiry enforced.
    pub fn with_contexts<I, S>(contexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { contexts: contexts.into_iter().map(Into::into).collect(), expire: true }
    }

    /// Accept chests of any age. Future timestamps are still rejected.
    #[must_use]
    pub fn without_expiry(mut self) -> Self {
        self.expire = false;
        self
    }
}

/// Locks strings into chests and unlocks them.
///
/// Immutable after construction; share freely across threads.
///
/// ```
/// use chester_core::{Chester, ChesterConfig, LockOptions, UnlockOptions};
///
/// let chester = Chester::new("secret", ChesterConfig::default()).unwrap();
/// let chest = chester.lock("treasure", &LockOptions::default()).unwrap();
/// assert_eq!(chester.unlock(&chest, &UnlockOptions::default()).unwrap(), "treasure");
/// ```
pub struct Chester<E: Environment = SystemEnv> {
    config: ChesterConfig,
    mac_key: Zeroizing<Vec<u8>>,
    crypter: Crypter<E>,
    level: CompressionLevel,
    env: E,
}

impl<E: Environment> fmt::Debug for Chester<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chester").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Chester<SystemEnv> {
    /// Create a Chester using the system clock and OS randomness.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` listing every problem with `secret` and `config`
    pub fn new(secret: impl Into<Secret>, config: ChesterConfig) -> Result<Self, ChesterError> {
        Self::with_env(secret, config, SystemEnv)
    }
}

impl<E: Environment> Chester<E> {
    /// Create a Chester reading time and randomness from `env`.
    ///
    /// The cipher key is SHA-256 of the encoded secret followed by the
    /// encoded name, so instances with different names cannot read each
    /// other's chests even when they share a secret.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` listing every problem with `secret` and `config`
    pub fn with_env(
        secret: impl Into<Secret>,
        config: ChesterConfig,
        env: E,
    ) -> Result<Self, ChesterError> {
        let secret = secret.into();

        let mut problems = Vec::new();
        if secret.is_empty() {
            problems.push("secret must not be empty".to_string());
        }
        let secret_bytes = secret.encoded(config.encoding);
        if let Err(err) = &secret_bytes {
            problems.push(format!("secret: {err}"));
        }
        let name_bytes = config.encoding.encode(&config.name);
        if let Err(err) = &name_bytes {
            problems.push(format!("name: {err}"));
        }
        problems.extend(config.problems());

        let (Ok(secret_bytes), Ok(name_bytes), Ok(level), true) = (
            secret_bytes,
            name_bytes,
            CompressionLevel::new(config.gzip_level),
            problems.is_empty(),
        ) else {
            tracing::debug!(name = %config.name, ?problems, "rejected chester configuration");
            return Err(ChesterError::InvalidConfig { problems });
        };

        let mut material =
            Zeroizing::new(Vec::with_capacity(secret_bytes.len() + name_bytes.len()));
        material.extend_from_slice(&secret_bytes);
        material.extend_from_slice(&name_bytes);

        let crypter = Crypter::with_env(&material, config.crypter_config(), env.clone())
            .map_err(|err| ChesterError::InvalidConfig { problems: vec![err.to_string()] })?;

        tracing::debug!(
            name = %config.name,
            encoding = %config.encoding,
            gzip = %config.gzip,
            cipher = %config.cipher,
            max_age_secs = config.max_age_secs,
            "chester created"
        );

        Ok(Self { mac_key: secret.mac_key(), config, crypter, level, env })
    }

    /// Namespace of this instance.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Options this instance was built with.
    pub fn config(&self) -> &ChesterConfig {
        &self.config
    }

    /// Lock `treasure` into a chest.
    ///
    /// Each call draws a fresh IV, so locking the same treasure twice yields
    /// different chests.
    ///
    /// # Errors
    ///
    /// - `Encoding` if the treasure or a context cannot be represented in
    ///   the configured encoding
    /// - `TimestampOutOfRange` if the clock is before the zero time or more
    ///   than `u32::MAX` seconds after it
    pub fn lock(&self, treasure: &str, options: &LockOptions) -> Result<String, ChesterError> {
        let contexts = self.encode_contexts(&options.contexts)?;
        let payload = self.config.encoding.encode(treasure)?;
        let timestamp = self.timestamp()?;

        let Compressed { bytes, compressed } = compress(self.config.gzip, self.level, &payload);

        let mut signature =
            compute_signature(&self.mac_key, &bytes, &timestamp.to_be_bytes(), &contexts);
        set_compressed_flag(&mut signature, compressed);

        let frame = InnerFrame::new(signature, timestamp, bytes);
        let chest = self.crypter.encrypt(&frame.to_vec());

        tracing::trace!(
            name = %self.config.name,
            timestamp,
            compressed,
            payload_len = frame.payload.len(),
            "locked chest"
        );
        Ok(chest)
    }

    /// Unlock a chest produced by [`Chester::lock`].
    ///
    /// # Errors
    ///
    /// - `Encoding` if a context cannot be represented in the encoding
    /// - `Integrity` if the chest cannot be decoded or decrypted
    /// - `Signature` if the chest was not locked by this secret and name
    ///   with exactly these contexts
    /// - `TimeTravel` if the chest's timestamp is in the future
    /// - `Expired` if `expire` is set and the chest is too old
    /// - `Decompression` if the signed payload is flagged compressed but is
    ///   not gzip
    pub fn unlock(&self, chest: &str, options: &UnlockOptions) -> Result<String, ChesterError> {
        self.open(chest, options).inspect_err(|err| {
            tracing::debug!(
                name = %self.config.name,
                kind = ?err.kind(),
                error = %err,
                "rejected chest"
            );
        })
    }

    fn open(&self, chest: &str, options: &UnlockOptions) -> Result<String, ChesterError> {
        let contexts = self.encode_contexts(&options.contexts)?;

        let raw = self.crypter.decrypt(chest).map_err(ChesterError::Integrity)?;
        let frame = InnerFrame::decode(&raw).map_err(|_| ChesterError::Signature)?;

        let mut expected =
            compute_signature(&self.mac_key, &frame.payload, &frame.timestamp_bytes(), &contexts);
        set_compressed_flag(&mut expected, frame.is_compressed());
        if !signatures_match(&frame.signature, &expected) {
            return Err(ChesterError::Signature);
        }

        let now = i128::from(self.env.wall_clock_secs());
        let age = now - i128::from(self.config.zero_time) - i128::from(frame.timestamp);
        if age < 0 {
            return Err(ChesterError::TimeTravel {
                ahead_secs: u64::try_from(-age).unwrap_or(u64::MAX),
            });
        }
        let age_secs = u64::try_from(age).unwrap_or(u64::MAX);
        if options.expire && age_secs > self.config.max_age_secs {
            return Err(ChesterError::Expired { age_secs, max_age_secs: self.config.max_age_secs });
        }

        let payload = if frame.is_compressed() {
            gunzip(&frame.payload).map_err(ChesterError::Decompression)?
        } else {
            frame.payload.to_vec()
        };

        tracing::trace!(name = %self.config.name, age_secs, "unlocked chest");
        Ok(self.config.encoding.decode(&payload))
    }

    fn encode_contexts(&self, contexts: &[String]) -> Result<Vec<Vec<u8>>, ChesterError> {
        contexts
            .iter()
            .map(|context| self.config.encoding.encode(context).map_err(ChesterError::from))
            .collect()
    }

    fn timestamp(&self) -> Result<u32, ChesterError> {
        let now = self.env.wall_clock_secs();
        let zero_time = self.config.zero_time;
        now.checked_sub(zero_time)
            .and_then(|elapsed| u32::try_from(elapsed).ok())
            .ok_or(ChesterError::TimestampOutOfRange { now, zero_time })
    }
}
