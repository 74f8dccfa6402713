//! Protocol parameters: every fixed constant the engines enforce.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};

/// All protocol parameters.
///
/// Deserializes from a partial TOML table; missing fields take the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    // ── Admission ────────────────────────────────────────────────────────
    /// Registered-airline count below which a single Participant admits directly.
    pub bootstrap_airline_count: u32,

    /// Share of registered airlines (basis points, rounded up) whose votes admit
    /// a pending airline. 5000 = 50%.
    pub admission_threshold_bps: u32,

    /// Minimum funding that promotes a Registered airline to Participant.
    pub airline_funding_threshold: Amount,

    // ── Oracles ──────────────────────────────────────────────────────────
    /// Minimum fee paid to register an oracle.
    pub oracle_registration_fee: Amount,

    /// Size of the sampling index domain; indices are drawn from `[0, domain)`.
    pub oracle_index_domain: u8,

    /// Distinct indices assigned to each oracle.
    pub indices_per_oracle: u8,

    /// Matching responses required to resolve a status request.
    pub response_quorum: u32,

    // ── Insurance ────────────────────────────────────────────────────────
    /// Smallest premium accepted for a policy.
    pub min_premium: Amount,

    /// Largest premium accepted for a policy.
    pub max_premium: Amount,

    /// Payout as a multiple of the insured amount (basis points). 15000 = 150%.
    pub payout_multiple_bps: u32,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            bootstrap_airline_count: 4,
            admission_threshold_bps: 5_000,
            airline_funding_threshold: Amount::from_ether(10),

            oracle_registration_fee: Amount::from_ether(1),
            oracle_index_domain: 10,
            indices_per_oracle: 3,
            response_quorum: 3,

            min_premium: Amount::new(1),
            max_premium: Amount::from_ether(1),
            payout_multiple_bps: 15_000,
        }
    }
}

impl ProtocolParams {
    /// Votes needed to admit a pending airline given the current registered count.
    ///
    /// One vote during bootstrap; otherwise `ceil(count × threshold)` and never zero.
    pub fn required_votes(&self, registered_count: u32) -> u32 {
        if registered_count < self.bootstrap_airline_count {
            return 1;
        }
        let scaled = u64::from(registered_count) * u64::from(self.admission_threshold_bps);
        let required = scaled.div_ceil(10_000);
        u32::try_from(required).unwrap_or(u32::MAX).max(1)
    }

    /// Whether the system is still in the single-approver bootstrap phase.
    pub fn is_bootstrap(&self, registered_count: u32) -> bool {
        registered_count < self.bootstrap_airline_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_votes_is_half_rounded_up() {
        let params = ProtocolParams::default();
        assert_eq!(params.required_votes(4), 2);
        assert_eq!(params.required_votes(5), 3);
        assert_eq!(params.required_votes(6), 3);
        assert_eq!(params.required_votes(7), 4);
    }

    #[test]
    fn bootstrap_requires_single_vote() {
        let params = ProtocolParams::default();
        for count in 0..4 {
            assert!(params.is_bootstrap(count));
            assert_eq!(params.required_votes(count), 1);
        }
        assert!(!params.is_bootstrap(4));
    }

    #[test]
    fn required_votes_saturates() {
        let params = ProtocolParams {
            admission_threshold_bps: u32::MAX,
            bootstrap_airline_count: 0,
            ..ProtocolParams::default()
        };
        assert_eq!(params.required_votes(u32::MAX), u32::MAX);
        assert_eq!(params.required_votes(0), 1);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let params: ProtocolParams = toml::from_str("response_quorum = 5").unwrap();
        assert_eq!(params.response_quorum, 5);
        assert_eq!(params.payout_multiple_bps, 15_000);
        assert_eq!(params.airline_funding_threshold, Amount::from_ether(10));
    }
}
