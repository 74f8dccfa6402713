//! Adapter that lets the response aggregator settle through the ledger and
//! payout engine.

use crate::error::InsuranceError;
use crate::ledger::InsuranceLedger;
use crate::payout::PayoutEngine;
use flightsure_oracles::{Credit, Settlement, SettlementError};
use flightsure_store::{CreditStore, PolicyStore};
use flightsure_types::{FlightKey, StatusCode};

pub struct InsuranceSettlement<'a, S> {
    ledger: &'a InsuranceLedger<S>,
    payout: &'a PayoutEngine<S>,
}

impl<'a, S> InsuranceSettlement<'a, S> {
    pub fn new(ledger: &'a InsuranceLedger<S>, payout: &'a PayoutEngine<S>) -> Self {
        Self { ledger, payout }
    }
}

impl<S: PolicyStore + CreditStore> Settlement for InsuranceSettlement<'_, S> {
    fn record_status(&self, flight: &FlightKey, status: StatusCode) -> Result<(), SettlementError> {
        self.ledger
            .record_status(flight, status)
            .map(|_| ())
            .map_err(into_settlement)
    }

    fn credit_insurees(&self, flight: &FlightKey) -> Result<Vec<Credit>, SettlementError> {
        // Unregistered flights carry no policies, and a flight whose first
        // resolution was not airline fault keeps that status.
        let record = self.ledger.flight(flight).map_err(into_settlement)?;
        if record.and_then(|r| r.status) != Some(StatusCode::LateAirline) {
            return Ok(Vec::new());
        }
        self.payout.credit_insurees(flight).map_err(into_settlement)
    }
}

fn into_settlement(err: InsuranceError) -> SettlementError {
    match err {
        InsuranceError::Store(e) => SettlementError::Store(e),
        InsuranceError::PayoutOverflow { passenger, insured } => {
            SettlementError::Overflow { passenger, insured }
        }
        InsuranceError::NotPayable(flight) => SettlementError::NotPayable(flight),
        other => SettlementError::Rejected(other.to_string()),
    }
}
