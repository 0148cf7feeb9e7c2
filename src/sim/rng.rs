//! Random source for spawning and drops
//!
//! The simulation never reaches for a global generator. Every random decision
//! goes through a [`RandomSource`] handed to `tick`, so tests can script the
//! exact rolls they need.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Largest value of a percentage roll (rolls are `0..=ROLL_MAX`)
pub const ROLL_MAX: i32 = 100;

/// Integer random source with inclusive bounds
pub trait RandomSource {
    /// Uniform integer in `min..=max`
    fn roll(&mut self, min: i32, max: i32) -> i32;

    /// Roll `0..=100` and report whether it landed strictly below `percent`
    fn percent_below(&mut self, percent: i32) -> bool {
        self.roll(0, ROLL_MAX) < percent
    }
}

/// Default generator backed by PCG32
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the thread-local generator (no reproducibility)
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl RandomSource for GameRng {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Replays a fixed list of rolls, cycling when exhausted
///
/// Each value is clamped into the requested range. An empty sequence always
/// yields `min`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<i32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns the same value
    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }

    /// Number of rolls drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return min;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(min, max.max(min))
    }
}
