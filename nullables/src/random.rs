//! Nullable random: deterministic seeds.

use flightsure_random::{RandomError, RandomnessProvider};
use std::sync::Mutex;

/// A deterministic randomness provider for testing.
///
/// Returns pre-configured seeds in order, cycling when exhausted. The context
/// is mixed in by XOR so distinct identities still get distinct streams.
pub struct NullRandom {
    seeds: Vec<[u8; 32]>,
    index: Mutex<usize>,
}

impl NullRandom {
    /// Create with a sequence of deterministic seeds.
    pub fn new(seeds: Vec<[u8; 32]>) -> Self {
        assert!(!seeds.is_empty(), "NullRandom needs at least one seed");
        Self {
            seeds,
            index: Mutex::new(0),
        }
    }

    /// Create with a single seed returned for every call.
    pub fn constant(seed: [u8; 32]) -> Self {
        Self::new(vec![seed])
    }
}

impl RandomnessProvider for NullRandom {
    fn seed(&self, context: &[u8]) -> Result<[u8; 32], RandomError> {
        let mut idx = self
            .index
            .lock()
            .map_err(|_| RandomError::Unavailable("null random lock poisoned".into()))?;
        let mut seed = self.seeds[*idx % self.seeds.len()];
        *idx += 1;
        for (i, b) in context.iter().enumerate() {
            seed[i % 32] ^= b;
        }
        Ok(seed)
    }

    fn name(&self) -> &str {
        "null-random"
    }
}
