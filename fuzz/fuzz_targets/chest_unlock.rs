//! Fuzz target for Chester::unlock
//!
//! # Strategy
//!
//! - Raw text: arbitrary strings fed straight to `unlock`
//! - Bit flips: a genuine chest with one character replaced
//! - Reframed: arbitrary frame bytes encrypted under the real outer key, so
//!   the signature check itself is exercised
//!
//! # Invariants
//!
//! - `unlock` NEVER panics
//! - Every rejection is a decryption error
//! - A mutated chest never unlocks to a different treasure

#![no_main]

use arbitrary::Arbitrary;
use chester_core::{
    Chester, ChesterConfig, Crypter, Environment, ErrorKind, LockOptions, UnlockOptions,
};
use libfuzzer_sys::fuzz_target;

#[derive(Clone)]
struct FixedEnv;

impl Environment for FixedEnv {
    fn wall_clock_secs(&self) -> u64 {
        1_700_000_000
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        buffer.fill(0x3C);
    }
}

#[derive(Debug, Arbitrary)]
enum Input {
    RawText { chest: String, contexts: Vec<String> },
    Mutated { treasure: String, position: u16, replacement: u8 },
    Reframed { frame: Vec<u8> },
}

fuzz_target!(|input: Input| {
    let Ok(chester) = Chester::with_env("fuzz", ChesterConfig::default(), FixedEnv) else {
        return;
    };

    match input {
        Input::RawText { chest, contexts } => {
            if let Err(err) = chester.unlock(&chest, &UnlockOptions::with_contexts(contexts)) {
                assert!(err.is_decryption() || err.kind() == ErrorKind::Validation);
            }
        },
        Input::Mutated { treasure, position, replacement } => {
            let Ok(chest) = chester.lock(&treasure, &LockOptions::default()) else {
                return;
            };
            let mut bytes = chest.into_bytes();
            let at = usize::from(position) % bytes.len();
            let replacement = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_"
                [usize::from(replacement) % 64];
            if bytes[at] == replacement {
                return;
            }
            bytes[at] = replacement;
            let Ok(mutated) = String::from_utf8(bytes) else {
                return;
            };

            match chester.unlock(&mutated, &UnlockOptions::default()) {
                Ok(unlocked) => assert_eq!(unlocked, treasure),
                Err(err) => assert!(err.is_decryption()),
            }
        },
        Input::Reframed { frame } => {
            let config = ChesterConfig::default().crypter_config();
            let Ok(crypter) = Crypter::with_env(b"fuzzdefault", config, FixedEnv) else {
                return;
            };
            if let Err(err) = chester.unlock(&crypter.encrypt(&frame), &UnlockOptions::default()) {
                assert!(err.is_decryption());
            }
        },
    }
});
