//! Flight and insurance policy tables.

use crate::StoreError;
use flightsure_types::{Amount, FlightKey, PartyId, StatusCode};
use serde::{Deserialize, Serialize};

/// A flight registered by its operating airline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub key: FlightKey,
    /// Final status once oracles have resolved it.
    pub status: Option<StatusCode>,
}

/// One passenger's cover on one flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub passenger: PartyId,
    pub flight: FlightKey,
    pub insured: Amount,
}

pub trait PolicyStore {
    fn get_flight(&self, key: &FlightKey) -> Result<Option<FlightRecord>, StoreError>;
    fn put_flight(&self, record: &FlightRecord) -> Result<(), StoreError>;

    fn get_policy(
        &self,
        passenger: &PartyId,
        flight: &FlightKey,
    ) -> Result<Option<InsurancePolicy>, StoreError>;
    fn put_policy(&self, policy: &InsurancePolicy) -> Result<(), StoreError>;

    /// All policies written against `flight`, in passenger order.
    fn policies_for_flight(&self, flight: &FlightKey) -> Result<Vec<InsurancePolicy>, StoreError>;
}
