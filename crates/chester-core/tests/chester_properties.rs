//! Property-based tests for Chester
//!
//! 1. **Round-trip**: unlock(lock(t, ctx), ctx) == t for any treasure and contexts
//! 2. **Binding**: unlocking with different contexts is a signature error
//! 3. **Tamper evidence**: flipping any frame byte outside the compression bit
//!    is a signature error
//! 4. **Freshness**: the verdict depends only on the chest's age

use std::time::Duration;

use chester_core::{
    Chester, ChesterConfig, CompressionMode, Crypter, ErrorKind, LockOptions, UnlockOptions,
};
use chester_harness::SimEnv;
use proptest::prelude::*;

fn gzip_mode() -> impl Strategy<Value = CompressionMode> {
    prop_oneof![
        Just(CompressionMode::Auto),
        Just(CompressionMode::Force),
        Just(CompressionMode::Never)
    ]
}

fn contexts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(".{0,16}", 0..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_lock_unlock_roundtrip(
        seed in any::<u64>(),
        treasure in ".{0,256}",
        contexts in contexts(),
        gzip in gzip_mode(),
    ) {
        let env = SimEnv::with_seed(seed);
        let chester =
            Chester::with_env("secret", ChesterConfig { gzip, ..Default::default() }, env).unwrap();

        let chest = chester.lock(&treasure, &LockOptions::with_contexts(contexts.clone())).unwrap();
        let unlocked = chester.unlock(&chest, &UnlockOptions::with_contexts(contexts)).unwrap();

        prop_assert_eq!(unlocked, treasure);
    }

    #[test]
    fn prop_contexts_bind(
        seed in any::<u64>(),
        locked_with in contexts(),
        unlocked_with in contexts(),
    ) {
        // Contexts are concatenated, so only the joined bytes matter
        prop_assume!(locked_with.concat() != unlocked_with.concat());

        let env = SimEnv::with_seed(seed);
        let chester = Chester::with_env("secret", ChesterConfig::default(), env).unwrap();

        let chest = chester.lock("treasure", &LockOptions::with_contexts(locked_with)).unwrap();
        let err = chester.unlock(&chest, &UnlockOptions::with_contexts(unlocked_with)).unwrap_err();

        prop_assert_eq!(err.kind(), ErrorKind::Signature);
    }

    #[test]
    fn prop_tampering_is_detected(
        seed in any::<u64>(),
        treasure in "[a-z]{1,64}",
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let env = SimEnv::with_seed(seed);
        let chester = Chester::with_env("secret", ChesterConfig::default(), env.clone()).unwrap();
        let crypter = Crypter::with_env(
            b"secretdefault",
            ChesterConfig::default().crypter_config(),
            env,
        )
        .unwrap();

        let chest = chester.lock(&treasure, &LockOptions::default()).unwrap();
        let mut frame = crypter.decrypt(&chest).unwrap();

        let at = index.index(frame.len());
        let mask = if at == 0 { flip & !0x01 } else { flip };
        prop_assume!(mask != 0);
        frame[at] ^= mask;

        let err = chester.unlock(&crypter.encrypt(&frame), &UnlockOptions::default()).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Signature);
    }

    #[test]
    fn prop_freshness_depends_on_age(seed in any::<u64>(), age in 0u64..600, max_age in 1u64..300) {
        let env = SimEnv::with_seed(seed);
        let config = ChesterConfig { max_age_secs: max_age, ..Default::default() };
        let chester = Chester::with_env("secret", config, env.clone()).unwrap();

        let chest = chester.lock("treasure", &LockOptions::default()).unwrap();
        env.advance(Duration::from_secs(age));

        let result = chester.unlock(&chest, &UnlockOptions::default());
        if age <= max_age {
            prop_assert_eq!(result.unwrap(), "treasure");
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::Expired);
        }

        let lenient = chester.unlock(&chest, &UnlockOptions::default().without_expiry());
        prop_assert_eq!(lenient.unwrap(), "treasure");
    }
}
