//! Orchestration interface between oracle resolution and insurance payout.

use flightsure_store::StoreError;
use flightsure_types::{Amount, FlightKey, PartyId, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One passenger credited for one flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub passenger: PartyId,
    pub amount: Amount,
}

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("flight {0} has no airline-fault resolution")]
    NotPayable(String),

    #[error("payout for {passenger} overflows (insured {insured})")]
    Overflow { passenger: String, insured: Amount },

    #[error("settlement rejected: {0}")]
    Rejected(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Receives resolved flight statuses.
pub trait Settlement {
    /// Record the final status of `flight`. Called once per resolved request.
    fn record_status(&self, flight: &FlightKey, status: StatusCode) -> Result<(), SettlementError>;

    /// Credit every not-yet-credited policyholder on `flight`.
    ///
    /// Must be idempotent: a second call credits nobody twice.
    fn credit_insurees(&self, flight: &FlightKey) -> Result<Vec<Credit>, SettlementError>;
}
