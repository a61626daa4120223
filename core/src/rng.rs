//! Random number generation.
//!
//! RULE: Nothing in the engines calls a platform RNG directly. All
//! randomness flows through a `GameRng`, seeded from OS entropy in
//! production and from a fixed seed in tests.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct GameRng {
    inner: Pcg64Mcg,
}

impl GameRng {
    pub fn from_entropy() -> Self {
        Self { inner: Pcg64Mcg::from_entropy() }
    }

    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform draw in [low, high). Returns `low` for an empty range.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        low + self.next_f64() * (high - low)
    }

    /// Roll an index in [0, n).
    pub fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        (self.inner.next_u64() % n as u64) as usize
    }
}
