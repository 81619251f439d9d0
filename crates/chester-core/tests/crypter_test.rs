//! Crypter behavior tests

use std::collections::HashSet;

use chester_core::{CompressionMode, Crypter, CrypterConfig, CrypterError, codec};
use chester_harness::SimEnv;

fn crypter(env: &SimEnv, secret: &[u8], compression: CompressionMode) -> Crypter<SimEnv> {
    let config = CrypterConfig { compression, ..CrypterConfig::default() };
    Crypter::with_env(secret, config, env.clone()).unwrap()
}

#[test]
fn roundtrip_many_lengths() {
    let env = SimEnv::with_seed(100);
    let crypter = crypter(&env, b"secret", CompressionMode::Never);

    for len in 0..=256 {
        let buffer: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
        let token = crypter.encrypt(&buffer);
        assert_eq!(crypter.decrypt(&token).unwrap(), buffer, "len {len}");
    }
}

#[test]
fn every_token_is_unique() {
    let env = SimEnv::with_seed(101);
    let crypter = crypter(&env, b"secret", CompressionMode::Never);

    let tokens: HashSet<String> = (0..256).map(|_| crypter.encrypt(b"same input")).collect();
    assert_eq!(tokens.len(), 256);
}

#[test]
fn same_seed_same_tokens() {
    let a = crypter(&SimEnv::with_seed(102), b"secret", CompressionMode::Never);
    let b = crypter(&SimEnv::with_seed(102), b"secret", CompressionMode::Never);

    assert_eq!(a.encrypt(b"payload"), b.encrypt(b"payload"));
}

#[test]
fn compression_flag_travels_in_token() {
    let env = SimEnv::with_seed(103);
    let force = crypter(&env, b"secret", CompressionMode::Force);
    let auto = crypter(&env, b"secret", CompressionMode::Auto);

    let buffer = vec![b'0'; 4096];
    let compressed = force.encrypt(&buffer);

    assert!(compressed.len() < buffer.len());
    assert_eq!(auto.decrypt(&compressed).unwrap(), buffer);
    assert_eq!(force.decrypt(&auto.encrypt(b"xy")).unwrap(), b"xy");
}

#[test]
fn never_ignores_iv_parity() {
    let env = SimEnv::with_seed(107);
    let never = crypter(&env, b"secret", CompressionMode::Never);
    let force = crypter(&env, b"secret", CompressionMode::Force);

    let odd = (0..64)
        .map(|_| codec::decode(&never.encrypt(b"plain")).unwrap()[0] & 0x01)
        .filter(|bit| *bit == 1)
        .count();
    assert!(odd > 0 && odd < 64, "odd IVs: {odd}");

    // Plaintext comes back untouched, gzip stream included
    let raw = never.decrypt(&force.encrypt(b"plain")).unwrap();
    assert_eq!(&raw[..2], [0x1f, 0x8b]);
}

#[test]
fn auto_leaves_incompressible_input_alone() {
    let env = SimEnv::with_seed(104);
    let auto = crypter(&env, b"secret", CompressionMode::Auto);

    let token = auto.encrypt(b"xy");
    let raw = codec::decode(&token).unwrap();
    assert_eq!(raw[0] & 0x01, 0);
    assert_eq!(raw.len(), 32);
}

#[test]
fn wrong_secret_never_yields_plaintext() {
    let env = SimEnv::with_seed(105);
    let right = crypter(&env, b"right", CompressionMode::Never);
    let wrong = crypter(&env, b"wrong", CompressionMode::Never);

    let buffer = b"confidential buffer contents".to_vec();
    for _ in 0..64 {
        match wrong.decrypt(&right.encrypt(&buffer)) {
            Ok(garbage) => assert_ne!(garbage, buffer),
            Err(err) => assert!(matches!(err, CrypterError::Cipher(_)), "{err}"),
        }
    }
}

#[test]
fn rejects_structurally_invalid_tokens() {
    let env = SimEnv::with_seed(106);
    let crypter = crypter(&env, b"secret", CompressionMode::Never);

    assert!(matches!(crypter.decrypt(""), Err(CrypterError::Codec(_))));
    assert!(matches!(crypter.decrypt("AAAA1"), Err(CrypterError::Codec(_))));
    assert_eq!(
        crypter.decrypt(&codec::encode(&[0u8; 10])),
        Err(CrypterError::TooShort { iv_len: 16, actual: 10 })
    );
    assert!(matches!(
        crypter.decrypt(&codec::encode(&[0u8; 16 + 15])),
        Err(CrypterError::Cipher(_))
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let config = CrypterConfig { iv_length: 32, ..CrypterConfig::default() };
    let err = Crypter::new(b"secret", config).unwrap_err();

    let CrypterError::InvalidConfig { problems } = err else {
        panic!("expected InvalidConfig");
    };
    assert_eq!(problems, ["iv_length must be 16 for aes-256-cbc, got 32"]);
}

#[test]
fn system_env_roundtrip() {
    let crypter = Crypter::new(b"secret", CrypterConfig::default()).unwrap();
    let token = crypter.encrypt(b"with real randomness");
    assert_eq!(crypter.decrypt(&token).unwrap(), b"with real randomness");
}
