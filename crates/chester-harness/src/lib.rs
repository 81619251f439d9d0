//! Deterministic test harness for Chester.
//!
//! [`SimEnv`] implements [`chester_core::Environment`] with a virtual wall
//! clock and a seeded RNG, so tests can lock a chest, move time forward or
//! backward, and observe expiry and time-travel rejections without sleeping.

#![forbid(unsafe_code)]

pub mod sim_env;

pub use sim_env::SimEnv;
