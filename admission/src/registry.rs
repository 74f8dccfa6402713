//! Airline registry: per-airline identity and lifecycle state.

use crate::error::AdmissionError;
use flightsure_store::{AirlineRecord, AirlineStore};
use flightsure_types::{AirlineState, Amount, PartyId};
use std::sync::Arc;

/// Typed access to the airline table. Every state change goes through
/// [`AirlineRegistry::advance`], which refuses anything but a forward step.
pub struct AirlineRegistry<S> {
    store: Arc<S>,
}

impl<S: AirlineStore> AirlineRegistry<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn get(&self, id: &PartyId) -> Result<Option<AirlineRecord>, AdmissionError> {
        Ok(self.store.get_airline(id)?)
    }

    /// Current state; `Unknown` for airlines never proposed.
    pub fn state(&self, id: &PartyId) -> Result<AirlineState, AdmissionError> {
        Ok(self
            .store
            .get_airline(id)?
            .map_or(AirlineState::Unknown, |r| r.state))
    }

    pub fn admitted_count(&self) -> Result<u32, AdmissionError> {
        Ok(self.store.admitted_airline_count()?)
    }

    /// Create the record for a never-seen airline directly in `state`.
    pub fn insert(
        &self,
        id: &PartyId,
        name: &str,
        state: AirlineState,
    ) -> Result<AirlineRecord, AdmissionError> {
        let current = self.state(id)?;
        if current != AirlineState::Unknown {
            return Err(AdmissionError::AlreadyProposed {
                airline: id.to_string(),
                state: current,
            });
        }
        if !current.can_transition_to(state) {
            return Err(AdmissionError::IllegalTransition {
                from: current,
                to: state,
            });
        }
        let record = AirlineRecord {
            id: id.clone(),
            name: name.to_string(),
            state,
            funded: Amount::ZERO,
        };
        self.store.put_airline(&record)?;
        Ok(record)
    }

    /// Move an existing airline one step forward, recording `funded` if given.
    pub fn advance(
        &self,
        id: &PartyId,
        next: AirlineState,
        funded: Option<Amount>,
    ) -> Result<AirlineRecord, AdmissionError> {
        let mut record = self
            .store
            .get_airline(id)?
            .ok_or_else(|| AdmissionError::AirlineNotFound(id.to_string()))?;
        if !record.state.can_transition_to(next) {
            return Err(AdmissionError::IllegalTransition {
                from: record.state,
                to: next,
            });
        }
        record.state = next;
        if let Some(amount) = funded {
            record.funded = amount;
        }
        self.store.put_airline(&record)?;
        Ok(record)
    }
}
