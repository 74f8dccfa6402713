//! Airline registry and vote tally tables.

use crate::StoreError;
use flightsure_types::{AirlineState, Amount, PartyId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-airline registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineRecord {
    pub id: PartyId,
    pub name: String,
    pub state: AirlineState,
    /// Funding contributed on promotion to Participant; zero before.
    pub funded: Amount,
}

/// Votes collected for one pending airline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub voters: BTreeSet<PartyId>,
}

impl VoteTally {
    pub fn votes(&self) -> u32 {
        self.voters.len() as u32
    }

    pub fn has_voted(&self, voter: &PartyId) -> bool {
        self.voters.contains(voter)
    }
}

/// Trait for the airline registry and its vote tallies.
pub trait AirlineStore {
    fn get_airline(&self, id: &PartyId) -> Result<Option<AirlineRecord>, StoreError>;
    fn put_airline(&self, record: &AirlineRecord) -> Result<(), StoreError>;

    /// Number of airlines in Registered or Participant state.
    fn admitted_airline_count(&self) -> Result<u32, StoreError>;

    fn get_tally(&self, airline: &PartyId) -> Result<Option<VoteTally>, StoreError>;
    fn put_tally(&self, airline: &PartyId, tally: &VoteTally) -> Result<(), StoreError>;
}
