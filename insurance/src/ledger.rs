//! Insurance ledger: registered flights and passenger policies.

use crate::error::InsuranceError;
use flightsure_store::{FlightRecord, InsurancePolicy, PolicyStore};
use flightsure_types::{Amount, FlightKey, PartyId, ProtocolParams, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

pub struct InsuranceLedger<S> {
    store: Arc<S>,
    min_premium: Amount,
    max_premium: Amount,
}

impl<S: PolicyStore> InsuranceLedger<S> {
    pub fn new(store: Arc<S>, params: &ProtocolParams) -> Self {
        Self {
            store,
            min_premium: params.min_premium,
            max_premium: params.max_premium,
        }
    }

    /// Register a departure so policies can be sold against it.
    ///
    /// The caller checks that the operating airline is a Participant.
    pub fn register_flight(&self, key: &FlightKey) -> Result<FlightRecord, InsuranceError> {
        if self.store.get_flight(key)?.is_some() {
            return Err(InsuranceError::FlightAlreadyRegistered(key.to_string()));
        }
        let record = FlightRecord {
            key: key.clone(),
            status: None,
        };
        self.store.put_flight(&record)?;
        info!(flight = %key, id = %key.id(), "flight registered");
        Ok(record)
    }

    /// Sell `passenger` cover of `amount` on `flight`. The premium is the
    /// insured amount and belongs in the pooled funds once this returns.
    pub fn buy_policy(
        &self,
        passenger: &PartyId,
        flight: &FlightKey,
        amount: Amount,
    ) -> Result<InsurancePolicy, InsuranceError> {
        if amount < self.min_premium {
            return Err(InsuranceError::PremiumTooLow {
                min: self.min_premium,
                provided: amount,
            });
        }
        if amount > self.max_premium {
            return Err(InsuranceError::PremiumTooHigh {
                max: self.max_premium,
                provided: amount,
            });
        }
        let record = self
            .store
            .get_flight(flight)?
            .ok_or_else(|| InsuranceError::FlightNotFound(flight.to_string()))?;
        if record.status.is_some() {
            return Err(InsuranceError::FlightResolved(flight.to_string()));
        }
        if self.store.get_policy(passenger, flight)?.is_some() {
            return Err(InsuranceError::DuplicatePolicy {
                passenger: passenger.to_string(),
                flight: flight.to_string(),
            });
        }

        let policy = InsurancePolicy {
            passenger: passenger.clone(),
            flight: flight.clone(),
            insured: amount,
        };
        self.store.put_policy(&policy)?;
        info!(passenger = %passenger, flight = %flight, %amount, "policy purchased");
        Ok(policy)
    }

    /// Record the resolved status of a registered flight.
    ///
    /// Returns `false` without effect if the flight was never registered here
    /// or already carries a status; the first resolution stands.
    pub fn record_status(
        &self,
        flight: &FlightKey,
        status: StatusCode,
    ) -> Result<bool, InsuranceError> {
        let Some(mut record) = self.store.get_flight(flight)? else {
            debug!(flight = %flight, %status, "status for unregistered flight ignored");
            return Ok(false);
        };
        if let Some(existing) = record.status {
            debug!(flight = %flight, %status, %existing, "flight already resolved, status ignored");
            return Ok(false);
        }
        record.status = Some(status);
        self.store.put_flight(&record)?;
        Ok(true)
    }

    pub fn flight(&self, key: &FlightKey) -> Result<Option<FlightRecord>, InsuranceError> {
        Ok(self.store.get_flight(key)?)
    }

    pub fn policy(
        &self,
        passenger: &PartyId,
        flight: &FlightKey,
    ) -> Result<Option<InsurancePolicy>, InsuranceError> {
        Ok(self.store.get_policy(passenger, flight)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightsure_nullables::MemoryStore;
    use flightsure_types::Timestamp;

    fn flight() -> FlightKey {
        FlightKey::new("A1".into(), "ND1309".into(), Timestamp::new(1_700_000_000))
    }

    fn ledger() -> InsuranceLedger<MemoryStore> {
        let ledger = InsuranceLedger::new(Arc::new(MemoryStore::new()), &ProtocolParams::default());
        ledger.register_flight(&flight()).unwrap();
        ledger
    }

    #[test]
    fn buy_within_range() {
        let ledger = ledger();
        let policy = ledger
            .buy_policy(&"P1".into(), &flight(), Amount::from_ether(1))
            .unwrap();
        assert_eq!(policy.insured, Amount::from_ether(1));
        assert!(ledger.policy(&"P1".into(), &flight()).unwrap().is_some());
    }

    #[test]
    fn premium_bounds_enforced() {
        let ledger = ledger();
        let too_high = Amount::new(Amount::from_ether(1).raw() + 1);
        assert!(matches!(
            ledger.buy_policy(&"P1".into(), &flight(), too_high).unwrap_err(),
            InsuranceError::PremiumTooHigh { .. }
        ));
        assert!(matches!(
            ledger
                .buy_policy(&"P1".into(), &flight(), Amount::ZERO)
                .unwrap_err(),
            InsuranceError::PremiumTooLow { .. }
        ));
        assert!(ledger.policy(&"P1".into(), &flight()).unwrap().is_none());
    }

    #[test]
    fn second_policy_same_flight_rejected() {
        let ledger = ledger();
        ledger
            .buy_policy(&"P1".into(), &flight(), Amount::new(100))
            .unwrap();
        let err = ledger
            .buy_policy(&"P1".into(), &flight(), Amount::new(100))
            .unwrap_err();
        assert!(matches!(err, InsuranceError::DuplicatePolicy { .. }));
    }

    #[test]
    fn unregistered_flight_rejected() {
        let ledger = ledger();
        let other = FlightKey::new("A1".into(), "ND0000".into(), Timestamp::new(1));
        let err = ledger
            .buy_policy(&"P1".into(), &other, Amount::new(100))
            .unwrap_err();
        assert!(matches!(err, InsuranceError::FlightNotFound(_)));
    }

    #[test]
    fn no_sales_after_resolution() {
        let ledger = ledger();
        assert!(ledger.record_status(&flight(), StatusCode::OnTime).unwrap());
        let err = ledger
            .buy_policy(&"P1".into(), &flight(), Amount::new(100))
            .unwrap_err();
        assert!(matches!(err, InsuranceError::FlightResolved(_)));
    }

    #[test]
    fn first_resolution_stands() {
        let ledger = ledger();
        assert!(ledger.record_status(&flight(), StatusCode::OnTime).unwrap());
        assert!(!ledger.record_status(&flight(), StatusCode::LateAirline).unwrap());
        assert_eq!(
            ledger.flight(&flight()).unwrap().unwrap().status,
            Some(StatusCode::OnTime)
        );
    }

    #[test]
    fn duplicate_flight_registration_rejected() {
        let ledger = ledger();
        assert!(matches!(
            ledger.register_flight(&flight()).unwrap_err(),
            InsuranceError::FlightAlreadyRegistered(_)
        ));
    }
}
