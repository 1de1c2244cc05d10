use std::ops::Range;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Entropy Seam - Injectable Randomness
// ============================================================================
//
// Payment coin flips and id suffixes draw through this trait. The seeded
// variant makes gateway outcomes reproducible in tests.
//
// ============================================================================

pub trait Entropy: Send + Sync {
    /// Draw true with the given probability in [0, 1]
    fn chance(&self, probability: f64) -> bool;

    /// Uniform draw from a half-open range
    fn number_in(&self, range: Range<u32>) -> u32;
}

/// Thread-local OS-seeded randomness
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn chance(&self, probability: f64) -> bool {
        rand::rng().random::<f64>() < probability
    }

    fn number_in(&self, range: Range<u32>) -> u32 {
        rand::rng().random_range(range)
    }
}

/// Deterministic randomness for tests
#[derive(Debug)]
pub struct SeededEntropy(Mutex<StdRng>);

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl Entropy for SeededEntropy {
    fn chance(&self, probability: f64) -> bool {
        let mut rng = self.0.lock().expect("entropy lock poisoned");
        rng.random::<f64>() < probability
    }

    fn number_in(&self, range: Range<u32>) -> u32 {
        let mut rng = self.0.lock().expect("entropy lock poisoned");
        rng.random_range(range)
    }
}
