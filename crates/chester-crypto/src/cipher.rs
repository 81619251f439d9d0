//! Block encryption using AES-256 in CBC mode with PKCS#7 padding
//!
//! All functions are pure - the IV must be provided by the caller.

use std::{fmt, str::FromStr};

use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::{error::CryptoError, key::DerivedKey};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Symmetric cipher and chaining mode.
///
/// Keys are always 32 bytes (SHA-256 output), so only 256-bit-key ciphers
/// are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cipher {
    /// AES-256 in CBC mode with PKCS#7 padding
    #[default]
    Aes256Cbc,
}

impl Cipher {
    /// Key length in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes256Cbc => 32,
        }
    }

    /// IV length in bytes.
    pub const fn iv_len(self) -> usize {
        match self {
            Self::Aes256Cbc => 16,
        }
    }

    /// Block size in bytes.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Aes256Cbc => 16,
        }
    }

    /// OpenSSL-style name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aes256Cbc => "aes-256-cbc",
        }
    }

    /// Ciphertext length for a plaintext of `len` bytes.
    ///
    /// PKCS#7 always adds between 1 and `block_size` bytes.
    pub const fn ciphertext_len(self, len: usize) -> usize {
        (len / self.block_size() + 1) * self.block_size()
    }

    fn check_iv(self, iv: &[u8]) -> Result<(), CryptoError> {
        if iv.len() == self.iv_len() {
            Ok(())
        } else {
            Err(CryptoError::InvalidIvLength { expected: self.iv_len(), actual: iv.len() })
        }
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cipher {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Self::Aes256Cbc.name()) {
            Ok(Self::Aes256Cbc)
        } else {
            Err(CryptoError::UnknownCipher { name: s.to_string() })
        }
    }
}

/// Encrypt `plaintext` under `key` and `iv`.
///
/// Returns the ciphertext only; the caller is responsible for transmitting
/// the IV alongside it.
///
/// # Errors
///
/// - `InvalidIvLength` if `iv` does not match the cipher's IV length
pub fn encrypt(
    cipher: Cipher,
    key: &DerivedKey,
    iv: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    cipher.check_iv(iv)?;

    match cipher {
        Cipher::Aes256Cbc => {
            let Ok(encryptor) = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv) else {
                unreachable!("key and IV lengths are checked above");
            };
            Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
        },
    }
}

/// Decrypt `ciphertext` under `key` and `iv`.
///
/// # Errors
///
/// - `InvalidIvLength` if `iv` does not match the cipher's IV length
/// - `InvalidCiphertextLength` if the ciphertext is empty or not block-aligned
/// - `BadPadding` if the padding of the final block is malformed
///
/// # Security
///
/// Success does NOT prove the key was right. Roughly 1 in 256 wrong-key
/// decryptions end in valid padding and return garbage. Verify a MAC over
/// the result before trusting it.
pub fn decrypt(
    cipher: Cipher,
    key: &DerivedKey,
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    cipher.check_iv(iv)?;

    let block_size = cipher.block_size();
    if ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
        return Err(CryptoError::InvalidCiphertextLength { len: ciphertext.len(), block_size });
    }

    match cipher {
        Cipher::Aes256Cbc => {
            let Ok(decryptor) = Aes256CbcDec::new_from_slices(key.as_bytes(), iv) else {
                unreachable!("key and IV lengths are checked above");
            };
            decryptor
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| CryptoError::BadPadding)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::derive_key;

    const IV: [u8; 16] = [0x24; 16];

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = derive_key(b"roundtrip");
        let plaintext = b"Hello, World!";

        let ciphertext = encrypt(Cipher::Aes256Cbc, &key, &IV, plaintext).unwrap();
        let decrypted = decrypt(Cipher::Aes256Cbc, &key, &IV, &ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn empty_plaintext_produces_one_block() {
        let key = derive_key(b"empty");

        let ciphertext = encrypt(Cipher::Aes256Cbc, &key, &IV, b"").unwrap();

        assert_eq!(ciphertext.len(), 16);
        assert!(decrypt(Cipher::Aes256Cbc, &key, &IV, &ciphertext).unwrap().is_empty());
    }

    #[test]
    fn ciphertext_len_includes_padding() {
        let key = derive_key(b"padding");
        for len in [0, 1, 15, 16, 17, 31, 32, 100] {
            let ciphertext = encrypt(Cipher::Aes256Cbc, &key, &IV, &vec![0u8; len]).unwrap();
            assert_eq!(ciphertext.len(), Cipher::Aes256Cbc.ciphertext_len(len), "len {len}");
        }
    }

    #[test]
    fn first_block_matches_nist_vector() {
        // NIST SP 800-38A, F.2.5 CBC-AES256.Encrypt, block #1
        let key = DerivedKey::from_bytes(
            hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
                .unwrap()
                .try_into()
                .unwrap(),
        );
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ciphertext = encrypt(Cipher::Aes256Cbc, &key, &iv, &plaintext).unwrap();

        assert_eq!(ciphertext.len(), 32);
        assert_eq!(hex::encode(&ciphertext[..16]), "f58c4c04d6e5f1ba779eabfb5f7bfbd6");
    }

    #[test]
    fn encryption_is_deterministic_for_fixed_iv() {
        let key = derive_key(b"fixed");
        let a = encrypt(Cipher::Aes256Cbc, &key, &IV, b"deterministic").unwrap();
        let b = encrypt(Cipher::Aes256Cbc, &key, &IV, b"deterministic").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_iv_produces_different_ciphertext() {
        let key = derive_key(b"iv");
        let a = encrypt(Cipher::Aes256Cbc, &key, &[0x00; 16], b"same").unwrap();
        let b = encrypt(Cipher::Aes256Cbc, &key, &[0xFF; 16], b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_wrong_iv_length() {
        let key = derive_key(b"iv-len");
        assert_eq!(
            encrypt(Cipher::Aes256Cbc, &key, &[0u8; 12], b"x"),
            Err(CryptoError::InvalidIvLength { expected: 16, actual: 12 })
        );
        assert_eq!(
            decrypt(Cipher::Aes256Cbc, &key, &[0u8; 24], &[0u8; 16]),
            Err(CryptoError::InvalidIvLength { expected: 16, actual: 24 })
        );
    }

    #[test]
    fn rejects_unaligned_ciphertext() {
        let key = derive_key(b"aligned");
        assert_eq!(
            decrypt(Cipher::Aes256Cbc, &key, &IV, &[0u8; 17]),
            Err(CryptoError::InvalidCiphertextLength { len: 17, block_size: 16 })
        );
        assert_eq!(
            decrypt(Cipher::Aes256Cbc, &key, &IV, &[]),
            Err(CryptoError::InvalidCiphertextLength { len: 0, block_size: 16 })
        );
    }

    #[test]
    fn wrong_key_never_returns_plaintext() {
        let plaintext = b"a secret message that spans more than one block";
        let ciphertext =
            encrypt(Cipher::Aes256Cbc, &derive_key(b"right"), &IV, plaintext).unwrap();

        match decrypt(Cipher::Aes256Cbc, &derive_key(b"wrong"), &IV, &ciphertext) {
            Ok(garbage) => assert_ne!(garbage, plaintext),
            Err(err) => assert_eq!(err, CryptoError::BadPadding),
        }
    }

    #[test]
    fn cipher_names() {
        assert_eq!("aes-256-cbc".parse::<Cipher>().unwrap(), Cipher::Aes256Cbc);
        assert_eq!("AES-256-CBC".parse::<Cipher>().unwrap(), Cipher::Aes256Cbc);
        assert_eq!(Cipher::Aes256Cbc.to_string(), "aes-256-cbc");
        assert!("aes-128-cbc".parse::<Cipher>().is_err());
    }

    #[test]
    fn key_len_matches_derived_key() {
        assert_eq!(Cipher::Aes256Cbc.key_len(), crate::key::KEY_SIZE);
    }
}
