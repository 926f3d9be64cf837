//! Randomness seam for the simulation.
//!
//! Catalog draws, template picks, activity coin flips, and base scores all
//! go through [`EntropySource`] so tests can pin a seed and reproduce exact
//! registry states. Nothing outside this module calls `rand` directly.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the simulation's randomness
pub trait EntropySource: Send + Sync {
    /// Uniform float in [0, 1)
    fn next_f64(&self) -> f64;

    /// Uniform integer in [0, upper); `upper` must be non-zero
    fn next_below(&self, upper: usize) -> usize;
}

impl dyn EntropySource + '_ {
    /// Fresh camera baseline: 25.0..60.0
    pub fn base_score(&self) -> f64 {
        25.0 + self.next_f64() * 35.0
    }

    /// Fisher-Yates permutation of 0..len driven by this source
    pub fn shuffled_indices(&self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.next_below(i + 1);
            indices.swap(i, j);
        }
        indices
    }
}

/// [`EntropySource`] backed by a `StdRng`; OS-seeded in production,
/// fixed-seeded in tests
pub struct StdEntropy {
    rng: Mutex<StdRng>,
}

impl StdEntropy {
    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for StdEntropy {
    fn next_f64(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0.0..1.0)
    }

    fn next_below(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..upper)
    }
}
