//! Injectable random source used by every generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next(&mut self) -> f64;
}

/// Process RNG (`rand::thread_rng`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible RNG seeded from a `u64`.
#[derive(Clone, Debug)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling once exhausted.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Shuffles keep their input order and picks take the last element.
    pub fn keep_order() -> Self {
        Self::new(vec![1.0 - f64::EPSILON])
    }
}

impl RandomSource for SequenceRandom {
    fn next(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Uniform index in `0..len` (`len` must be non-zero).
pub(crate) fn pick_index(len: usize, rng: &mut dyn RandomSource) -> usize {
    ((rng.next() * len as f64) as usize).min(len.saturating_sub(1))
}

/// Fisher-Yates shuffle.
pub(crate) fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = pick_index(i + 1, rng);
        items.swap(i, j);
    }
}
