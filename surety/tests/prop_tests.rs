use flightsure_nullables::{MemoryStore, NullRandom, NullTransfer};
use flightsure_surety::{CallerRegistry, Collaborators, FlightSurety, SuretyConfig};
use flightsure_types::{Amount, FlightCode, PartyId, Timestamp};
use proptest::prelude::*;
use std::sync::Arc;

fn surety() -> FlightSurety<MemoryStore> {
    let config = SuretyConfig::default();
    let owner = PartyId::new(config.owner.clone());
    FlightSurety::new(
        Arc::new(MemoryStore::new()),
        &config,
        Collaborators {
            rng: Arc::new(NullRandom::constant([3u8; 32])),
            transfer: Arc::new(NullTransfer::new()),
            authorizer: Arc::new(CallerRegistry::new(owner)),
        },
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Pooled funds always equal the sum of accepted premiums; rejected
    /// purchases leave no trace.
    #[test]
    fn pool_tracks_accepted_premiums(
        purchases in prop::collection::vec((0u8..6, 0u64..2_000_000_000), 1..30)
    ) {
        let s = surety();
        let owner = PartyId::new("owner");
        let flight = FlightCode::new("FS1");
        let ts = Timestamp::new(42);
        s.register_flight(&owner, &owner, &flight, ts).unwrap();

        let mut expected = Amount::ZERO;
        for (p, gwei) in purchases {
            let passenger = PartyId::new(format!("P{p}"));
            let amount = Amount::new(gwei);
            if s.buy_policy(&owner, &passenger, &owner, &flight, ts, amount).is_ok() {
                expected = expected + amount;
            }
        }
        prop_assert_eq!(s.pooled_funds(), expected);
    }
}
