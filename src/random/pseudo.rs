//! Pseudo-random sources
//!
//! `ThreadRandom` uses the `rand` crate's thread-local RNG; `SeededRandom`
//! is deterministic for a given seed and is what tests and `--seed` use.

use crate::error::Result;
use crate::random::RandomSource;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Thread-local pseudo-random source
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl ThreadRandom {
    /// Create a new thread-local source
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandom {
    fn name(&self) -> &'static str {
        "thread"
    }

    fn floats(&self, n: usize) -> Result<Vec<f64>> {
        let mut rng = rand::thread_rng();
        Ok((0..n).map(|_| rng.gen::<f64>()).collect())
    }
}

/// Seeded pseudo-random source for reproducible placement
pub struct SeededRandom {
    rng: Mutex<rand::rngs::StdRng>,
}

impl SeededRandom {
    /// Create a new seeded source
    ///
    /// Using the same seed will produce the same sequence of random values.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn name(&self) -> &'static str {
        "seeded"
    }

    fn floats(&self, n: usize) -> Result<Vec<f64>> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok((0..n).map(|_| rng.gen::<f64>()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_floats_in_range() {
        let source = ThreadRandom::new();
        let floats = source.floats(100).unwrap();
        assert_eq!(floats.len(), 100);
        for f in &floats {
            assert!(*f >= 0.0 && *f < 1.0);
        }
    }

    #[test]
    fn test_seeded_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        assert_eq!(a.floats(50).unwrap(), b.floats(50).unwrap());
    }

    #[test]
    fn test_seeded_floats_in_range() {
        let source = SeededRandom::new(12345);
        for f in source.floats(1000).unwrap() {
            assert!((0.0..1.0).contains(&f), "Float {} out of range [0, 1)", f);
        }
    }
}
