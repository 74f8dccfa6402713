//! Voting tally: per-airline vote sets.

use crate::error::AdmissionError;
use flightsure_store::{AirlineStore, VoteTally};
use flightsure_types::PartyId;
use std::sync::Arc;

/// Vote bookkeeping for pending airlines. A voter appears at most once per
/// airline; the vote count is the size of the voter set.
pub struct VotingTally<S> {
    store: Arc<S>,
}

impl<S: AirlineStore> VotingTally<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn votes(&self, airline: &PartyId) -> Result<u32, AdmissionError> {
        Ok(self.store.get_tally(airline)?.map_or(0, |t| t.votes()))
    }

    /// Record one vote and return the new count.
    pub fn record(&self, airline: &PartyId, voter: &PartyId) -> Result<u32, AdmissionError> {
        let mut tally = self.store.get_tally(airline)?.unwrap_or_default();
        if tally.has_voted(voter) {
            return Err(AdmissionError::AlreadyVoted {
                voter: voter.to_string(),
                airline: airline.to_string(),
            });
        }
        tally.voters.insert(voter.clone());
        self.store.put_tally(airline, &tally)?;
        Ok(tally.votes())
    }

    /// Open a tally that already carries `voter`'s implicit vote.
    pub fn seed(&self, airline: &PartyId, voter: &PartyId) -> Result<(), AdmissionError> {
        let mut tally = VoteTally::default();
        tally.voters.insert(voter.clone());
        self.store.put_tally(airline, &tally)?;
        Ok(())
    }
}
