//! Seeded random numbers for the optional random resolver
//!
//! A ChaCha stream keyed by a `u64` seed, so a session replays exactly
//! when started with the same seed and the same commands.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Session random number generator
#[derive(Debug, Clone)]
pub struct DiceRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the operating system
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `0..n`, or 0 when `n` is 0
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Roll one die with `sides` faces: `1..=sides`, or 0 for a zero-sided die
    pub fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(1..=sides)
    }

    /// True with probability `percent`/100
    pub fn chance(&mut self, percent: u32) -> bool {
        self.below(100) < percent
    }

    /// Pick an element of a slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        items.get(self.below(len) as usize)
    }
}
