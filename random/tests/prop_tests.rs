use proptest::prelude::*;

use flightsure_random::{IndexSampler, Purpose, RandomError, RandomnessProvider};
use flightsure_types::PartyId;

struct FixedSeed([u8; 32]);

impl RandomnessProvider for FixedSeed {
    fn seed(&self, _context: &[u8]) -> Result<[u8; 32], RandomError> {
        Ok(self.0)
    }
    fn name(&self) -> &str {
        "fixed-seed"
    }
}

proptest! {
    /// Whatever the seed, assigned indices are in range and pairwise distinct.
    #[test]
    fn indices_distinct_and_bounded(
        seed in prop::array::uniform32(0u8..),
        domain in 3u8..=32,
        count in 1u8..=3,
        name in "[a-z]{1,12}",
    ) {
        let sampler = IndexSampler::new(domain);
        let party = PartyId::new(name);
        let indices = sampler
            .draw_distinct(&FixedSeed(seed), Purpose::OracleAssignment, &party, count)
            .unwrap();
        prop_assert_eq!(indices.len(), count as usize);
        for (i, a) in indices.iter().enumerate() {
            prop_assert!(*a < domain);
            for b in &indices[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }
}
