use proptest::prelude::*;

use flightsure_types::{Amount, FlightKey, ProtocolParams, StatusCode, Timestamp};

proptest! {
    /// The admission threshold is the smallest vote count reaching half the airlines.
    #[test]
    fn required_votes_is_ceiling_of_half(count in 4u32..10_000) {
        let params = ProtocolParams::default();
        let required = params.required_votes(count);
        prop_assert!(required * 2 >= count);
        prop_assert!((required - 1) * 2 < count);
    }

    /// Required votes never decrease as more airlines are admitted.
    #[test]
    fn required_votes_monotonic(count in 0u32..10_000) {
        let params = ProtocolParams::default();
        prop_assert!(params.required_votes(count + 1) >= params.required_votes(count));
    }

    /// The payout is never smaller than the premium for multiples of at least 100%.
    #[test]
    fn payout_covers_premium(gwei in 0u64..=1_000_000_000, bps in 10_000u32..30_000) {
        let premium = Amount::new(gwei);
        let payout = premium.checked_mul_bps(bps).unwrap();
        prop_assert!(payout >= premium);
    }

    /// Wire codes outside the defined set are rejected.
    #[test]
    fn undefined_status_codes_rejected(code in 0u8..=255) {
        let defined = [0u8, 10, 20, 30, 40, 50].contains(&code);
        prop_assert_eq!(StatusCode::try_from(code).is_ok(), defined);
    }

    /// Distinct departure times yield distinct flight ids.
    #[test]
    fn flight_id_separates_timestamps(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        prop_assume!(a != b);
        let ka = FlightKey::new("A1".into(), "ND1309".into(), Timestamp::new(a));
        let kb = FlightKey::new("A1".into(), "ND1309".into(), Timestamp::new(b));
        prop_assert_ne!(ka.id(), kb.id());
    }
}
