//! Simulated environment with a virtual clock and seeded randomness.

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chester_core::Environment;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Deterministic [`Environment`] for tests.
///
/// Clones share the same clock and RNG stream, so a `Chester` and the
/// `Crypter` it owns observe the same time. Two `SimEnv`s built from the same
/// seed produce the same byte sequence.
#[derive(Clone)]
pub struct SimEnv {
    seed: u64,
    rng: Arc<Mutex<ChaCha20Rng>>,
    clock: Arc<AtomicU64>,
}

impl SimEnv {
    /// Seed used by [`SimEnv::new`].
    pub const DEFAULT_SEED: u64 = 0;

    /// Initial wall clock, in seconds since the Unix epoch (2023-11-14).
    pub const DEFAULT_START_SECS: u64 = 1_700_000_000;

    /// Environment with the default seed.
    pub fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    /// Environment with an explicit seed.
    ///
    /// The seed is logged so a failing run can be reproduced.
    pub fn with_seed(seed: u64) -> Self {
        tracing::debug!(seed, "sim env created");
        Self {
            seed,
            rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))),
            clock: Arc::new(AtomicU64::new(Self::DEFAULT_START_SECS)),
        }
    }

    /// Seed this environment was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current virtual wall clock in seconds.
    pub fn wall_clock(&self) -> u64 {
        self.clock.load(Ordering::SeqCst)
    }

    /// Jump the wall clock to `secs`, forwards or backwards.
    pub fn set_wall_clock(&self, secs: u64) {
        self.clock.store(secs, Ordering::SeqCst);
    }

    /// Move the wall clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.fetch_add(by.as_secs(), Ordering::SeqCst);
    }

    /// Move the wall clock backward, saturating at the epoch.
    pub fn rewind(&self, by: Duration) {
        let secs = by.as_secs();
        let Ok(_) = self
            .clock
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| Some(now.saturating_sub(secs)))
        else {
            unreachable!("update closure always returns Some");
        };
    }
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for SimEnv {
    fn wall_clock_secs(&self) -> u64 {
        self.wall_clock()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_bytes() {
        let a = SimEnv::with_seed(7);
        let b = SimEnv::with_seed(7);

        let mut bytes_a = [0u8; 32];
        let mut bytes_b = [0u8; 32];
        a.random_bytes(&mut bytes_a);
        b.random_bytes(&mut bytes_b);

        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn different_seeds_differ() {
        let mut bytes_a = [0u8; 32];
        let mut bytes_b = [0u8; 32];
        SimEnv::with_seed(1).random_bytes(&mut bytes_a);
        SimEnv::with_seed(2).random_bytes(&mut bytes_b);

        assert_ne!(bytes_a, bytes_b);
    }

    #[test]
    fn clones_share_stream() {
        let env = SimEnv::with_seed(3);
        let clone = env.clone();

        let mut first = [0u8; 16];
        let mut second = [0u8; 16];
        env.random_bytes(&mut first);
        clone.random_bytes(&mut second);

        assert_ne!(first, second, "clone continues the stream instead of restarting it");
    }

    #[test]
    fn clock_moves_both_ways() {
        let env = SimEnv::new();
        let clone = env.clone();
        assert_eq!(env.wall_clock_secs(), SimEnv::DEFAULT_START_SECS);

        env.advance(Duration::from_secs(61));
        assert_eq!(clone.wall_clock_secs(), SimEnv::DEFAULT_START_SECS + 61);

        clone.rewind(Duration::from_secs(100));
        assert_eq!(env.wall_clock_secs(), SimEnv::DEFAULT_START_SECS - 39);

        env.set_wall_clock(5);
        env.rewind(Duration::from_secs(10));
        assert_eq!(env.wall_clock_secs(), 0);
    }
}
