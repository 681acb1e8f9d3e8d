//! Random number sources
//!
//! Sampling draws uniform floats through the `RandomSource` trait so that
//! placement runs can be made reproducible by swapping in a seeded source.

pub mod pseudo;

use crate::error::Result;

/// Trait for uniform random number sources
///
/// Implementations must be thread-safe (Send + Sync) to work with async server.
pub trait RandomSource: Send + Sync {
    /// Returns the source name (e.g., "thread", "seeded")
    fn name(&self) -> &'static str;

    /// Generate n random floats, each uniformly distributed in [0.0, 1.0)
    fn floats(&self, n: usize) -> Result<Vec<f64>>;

    /// Generate a single random float uniformly distributed in [0.0, 1.0)
    fn float(&self) -> Result<f64> {
        Ok(self.floats(1)?[0])
    }
}

/// Get a random source, seeded when a seed is given
pub fn get_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(pseudo::SeededRandom::new(seed)),
        None => Box::new(pseudo::ThreadRandom::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_source() {
        assert_eq!(get_source(None).name(), "thread");
        assert_eq!(get_source(Some(7)).name(), "seeded");
    }

    #[test]
    fn test_default_float_in_range() {
        let source = get_source(Some(1));
        let f = source.float().unwrap();
        assert!((0.0..1.0).contains(&f));
    }
}
