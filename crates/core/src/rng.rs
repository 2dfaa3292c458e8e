//! Seedable, serialisable random stream threaded through generation and AI.
//! This module exists to give the session one ChaCha stream whose exact
//! position survives a save/load cycle. It does not own any game rules.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRng {
    rng: ChaCha8Rng,
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Position in the ChaCha stream, in 32-bit words drawn so far.
    pub fn word_pos(&self) -> u128 {
        self.rng.get_word_pos()
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        let bound = bound as u64;
        // Widening multiply with rejection of the biased low zone.
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let wide = u128::from(self.rng.next_u64()) * u128::from(bound);
            if (wide as u64) >= threshold {
                return (wide >> 64) as usize;
            }
        }
    }

    /// Uniform value in `min..=max`.
    pub fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        min + self.below(max - min + 1)
    }

    /// True with probability `percent / 100`.
    pub fn percent(&mut self, percent: u32) -> bool {
        self.below(100) < percent as usize
    }
}
