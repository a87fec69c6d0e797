//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulator may call any platform RNG.
//! All randomness flows through one MatchRng per simulation,
//! constructed from the fixture seed and dropped when the match ends.
//!
//! The output function is a fixed PCG-style permutation:
//!   - 64-bit LCG state advance with wrapping arithmetic.
//!   - Output word is ((old >> 18) ^ old) truncated to 32 bits,
//!     rotated right by (old >> 27).
//!
//! Every constant below is part of the replay contract. Changing any of
//! them changes every recorded match.

use rand::{RngCore, SeedableRng};

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const XSHIFT: u32 = 18;
const ROT_SHIFT: u32 = 27;
const OUTPUT_SCALE: f64 = 4_294_967_296.0; // 2^32

/// The per-match pseudo-random source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRng {
    state:     u64,
    increment: u64,
}

impl MatchRng {
    /// Seed 0 is valid and not special-cased.
    pub fn new(seed: u64) -> Self {
        Self {
            state:     seed,
            increment: seed | 1,
        }
    }

    /// Advance the state and return the raw 32-bit output word.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(MULTIPLIER).wrapping_add(self.increment);
        let xorshifted = ((old >> XSHIFT) ^ old) as u32;
        let rotation = (old >> ROT_SHIFT) as u32;
        xorshifted.rotate_right(rotation)
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / OUTPUT_SCALE
    }

    /// Roll an integer in [0, n) as `floor(next_f64() * n)`.
    pub fn next_below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "n must be > 0");
        (self.next_f64() * f64::from(n)) as u32
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Current internal state word. Used by replay tooling and tests.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }
}

impl RngCore for MatchRng {
    fn next_u32(&mut self) -> u32 {
        MatchRng::next_u32(self)
    }

    /// Low word first, matching `rand_core`'s u32-based composition.
    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(MatchRng::next_u32(self));
        let hi = u64::from(MatchRng::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = MatchRng::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MatchRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// Same stream as `MatchRng::new`; the default impl would scramble the seed.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
