//! Configuration for [`Crypter`](crate::Crypter) and [`Chester`](crate::Chester).
//!
//! Both are plain structs with defaults; override fields with struct update
//! syntax. Validation reports every problem at once rather than stopping at
//! the first.

use chester_crypto::{Cipher, CompressionLevel, CompressionMode};

use crate::encoding::Encoding;

/// Default namespace.
pub const DEFAULT_NAME: &str = "default";

/// Default zero time: 2018-01-01T00:00:00Z.
pub const DEFAULT_ZERO_TIME: u64 = 1_514_764_800;

/// Default maximum chest age in seconds.
pub const DEFAULT_MAX_AGE_SECS: u64 = 60;

/// Options for a [`Crypter`](crate::Crypter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrypterConfig {
    /// Symmetric cipher
    pub cipher: Cipher,
    /// IV length in bytes; must equal the cipher's IV length
    pub iv_length: usize,
    /// Whether to gzip before encrypting
    pub compression: CompressionMode,
    /// gzip level, 0 through 9
    pub compression_level: u32,
}

impl Default for CrypterConfig {
    fn default() -> Self {
        Self {
            cipher: Cipher::Aes256Cbc,
            iv_length: Cipher::Aes256Cbc.iv_len(),
            compression: CompressionMode::Never,
            compression_level: CompressionLevel::BEST.get(),
        }
    }
}

impl CrypterConfig {
    /// Every problem with these options. Empty means valid.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.iv_length != self.cipher.iv_len() {
            problems.push(format!(
                "iv_length must be {} for {}, got {}",
                self.cipher.iv_len(),
                self.cipher,
                self.iv_length
            ));
        }
        if let Err(err) = CompressionLevel::new(self.compression_level) {
            problems.push(err.to_string());
        }
        problems
    }
}

/// Options for a [`Chester`](crate::Chester).
///
/// ```
/// use chester_core::{ChesterConfig, CompressionMode};
///
/// let config = ChesterConfig {
///     name: "sessions".to_string(),
///     gzip: CompressionMode::Never,
///     ..ChesterConfig::default()
/// };
/// assert!(config.problems().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChesterConfig {
    /// Namespace mixed into the cipher key
    pub name: String,
    /// Encoding for treasures, contexts, text secrets and the name
    pub encoding: Encoding,
    /// Epoch for chest timestamps, in Unix seconds
    pub zero_time: u64,
    /// Oldest acceptable chest, in seconds
    pub max_age_secs: u64,
    /// When to gzip treasures
    pub gzip: CompressionMode,
    /// gzip level, 0 through 9
    pub gzip_level: u32,
    /// Symmetric cipher
    pub cipher: Cipher,
    /// IV length in bytes; must equal the cipher's IV length
    pub iv_length: usize,
}

impl Default for ChesterConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            encoding: Encoding::Utf8,
            zero_time: DEFAULT_ZERO_TIME,
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            gzip: CompressionMode::Auto,
            gzip_level: CompressionLevel::BEST.get(),
            cipher: Cipher::Aes256Cbc,
            iv_length: Cipher::Aes256Cbc.iv_len(),
        }
    }
}

impl ChesterConfig {
    /// Every problem with these options. Empty means valid.
    ///
    /// Does not check the secret or whether `name` fits `encoding`; those
    /// are checked when the `Chester` is built.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.max_age_secs == 0 {
            problems.push("max_age_secs must be greater than 0".to_string());
        }
        problems.extend(self.crypter_config().problems());
        problems
    }

    /// Crypter options for the chest's outer layer.
    ///
    /// Compression is always `Never` here: Chester compresses the treasure
    /// itself and records the choice in the signature.
    pub fn crypter_config(&self) -> CrypterConfig {
        CrypterConfig {
            cipher: self.cipher,
            iv_length: self.iv_length,
            compression: CompressionMode::Never,
            compression_level: self.gzip_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ChesterConfig::default().problems().is_empty());
        assert!(CrypterConfig::default().problems().is_empty());
    }

    #[test]
    fn default_values() {
        let config = ChesterConfig::default();
        assert_eq!(config.name, "default");
        assert_eq!(config.encoding, Encoding::Utf8);
        assert_eq!(config.zero_time, 1_514_764_800);
        assert_eq!(config.max_age_secs, 60);
        assert_eq!(config.gzip, CompressionMode::Auto);
        assert_eq!(config.gzip_level, 9);
        assert_eq!(config.iv_length, 16);
    }

    #[test]
    fn all_problems_reported() {
        let config = ChesterConfig {
            max_age_secs: 0,
            gzip_level: 10,
            iv_length: 12,
            ..ChesterConfig::default()
        };

        let problems = config.problems();
        assert_eq!(problems.len(), 3, "{problems:?}");
        assert!(problems[0].contains("max_age_secs"));
        assert!(problems[1].contains("iv_length"));
        assert!(problems[2].contains("10"));
    }

    #[test]
    fn crypter_config_never_compresses() {
        let config = ChesterConfig { gzip: CompressionMode::Force, ..ChesterConfig::default() };
        assert_eq!(config.crypter_config().compression, CompressionMode::Never);
    }
}
