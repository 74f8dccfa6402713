//! In-memory transactional store.

use flightsure_store::{
    AirlineRecord, AirlineStore, CreditStore, FlightRecord, InsurancePolicy, OracleRecord,
    OracleStore, PolicyStore, RequestKey, RequestStore, StatusRequest, StoreError, Transactional,
    VoteTally,
};
use flightsure_types::{Amount, FlightKey, PartyId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Default)]
struct Tables {
    airlines: HashMap<PartyId, AirlineRecord>,
    tallies: HashMap<PartyId, VoteTally>,
    oracles: HashMap<PartyId, OracleRecord>,
    requests: HashMap<RequestKey, StatusRequest>,
    flights: HashMap<FlightKey, FlightRecord>,
    /// flight -> passenger -> policy
    policies: HashMap<FlightKey, BTreeMap<PartyId, InsurancePolicy>>,
    credits: HashMap<PartyId, Amount>,
    credited: BTreeSet<(FlightKey, PartyId)>,
}

/// Every table in memory, with snapshot-based transactions.
///
/// `begin` snapshots all tables; `rollback` restores the snapshot and `commit`
/// discards it. Thread-safe; callers serialize write transactions.
///
/// Commits can be switched to fail, leaving the transaction open for the
/// caller to roll back.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    snapshot: Mutex<Option<Tables>>,
    failing_commits: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }

    fn snapshot(&self) -> Result<MutexGuard<'_, Option<Tables>>, StoreError> {
        self.snapshot
            .lock()
            .map_err(|_| StoreError::Backend("memory store snapshot lock poisoned".into()))
    }

    /// Make subsequent commits fail (or succeed again).
    pub fn set_failing_commits(&self, failing: bool) {
        self.failing_commits.store(failing, Ordering::SeqCst);
    }

    /// Whether a write transaction is currently open.
    pub fn in_transaction(&self) -> bool {
        self.snapshot().map(|s| s.is_some()).unwrap_or(false)
    }
}

impl Transactional for MemoryStore {
    fn begin(&self) -> Result<(), StoreError> {
        let mut snapshot = self.snapshot()?;
        if snapshot.is_some() {
            return Err(StoreError::TransactionOpen);
        }
        *snapshot = Some(self.tables()?.clone());
        Ok(())
    }

    fn commit(&self) -> Result<(), StoreError> {
        if self.failing_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("memory store set to fail commits".into()));
        }
        self.snapshot()?
            .take()
            .map(|_| ())
            .ok_or(StoreError::NoTransaction)
    }

    fn rollback(&self) -> Result<(), StoreError> {
        let saved = self.snapshot()?.take().ok_or(StoreError::NoTransaction)?;
        *self.tables()? = saved;
        Ok(())
    }
}

impl AirlineStore for MemoryStore {
    fn get_airline(&self, id: &PartyId) -> Result<Option<AirlineRecord>, StoreError> {
        Ok(self.tables()?.airlines.get(id).cloned())
    }

    fn put_airline(&self, record: &AirlineRecord) -> Result<(), StoreError> {
        self.tables()?
            .airlines
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn admitted_airline_count(&self) -> Result<u32, StoreError> {
        Ok(self
            .tables()?
            .airlines
            .values()
            .filter(|a| a.state.is_admitted())
            .count() as u32)
    }

    fn get_tally(&self, airline: &PartyId) -> Result<Option<VoteTally>, StoreError> {
        Ok(self.tables()?.tallies.get(airline).cloned())
    }

    fn put_tally(&self, airline: &PartyId, tally: &VoteTally) -> Result<(), StoreError> {
        self.tables()?
            .tallies
            .insert(airline.clone(), tally.clone());
        Ok(())
    }
}

impl OracleStore for MemoryStore {
    fn get_oracle(&self, id: &PartyId) -> Result<Option<OracleRecord>, StoreError> {
        Ok(self.tables()?.oracles.get(id).cloned())
    }

    fn put_oracle(&self, record: &OracleRecord) -> Result<(), StoreError> {
        self.tables()?
            .oracles
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn oracle_count(&self) -> Result<u64, StoreError> {
        Ok(self.tables()?.oracles.len() as u64)
    }
}

impl RequestStore for MemoryStore {
    fn get_request(&self, key: &RequestKey) -> Result<Option<StatusRequest>, StoreError> {
        Ok(self.tables()?.requests.get(key).cloned())
    }

    fn put_request(&self, request: &StatusRequest) -> Result<(), StoreError> {
        self.tables()?
            .requests
            .insert(request.key.clone(), request.clone());
        Ok(())
    }
}

impl PolicyStore for MemoryStore {
    fn get_flight(&self, key: &FlightKey) -> Result<Option<FlightRecord>, StoreError> {
        Ok(self.tables()?.flights.get(key).cloned())
    }

    fn put_flight(&self, record: &FlightRecord) -> Result<(), StoreError> {
        self.tables()?
            .flights
            .insert(record.key.clone(), record.clone());
        Ok(())
    }

    fn get_policy(
        &self,
        passenger: &PartyId,
        flight: &FlightKey,
    ) -> Result<Option<InsurancePolicy>, StoreError> {
        Ok(self
            .tables()?
            .policies
            .get(flight)
            .and_then(|by_passenger| by_passenger.get(passenger))
            .cloned())
    }

    fn put_policy(&self, policy: &InsurancePolicy) -> Result<(), StoreError> {
        self.tables()?
            .policies
            .entry(policy.flight.clone())
            .or_default()
            .insert(policy.passenger.clone(), policy.clone());
        Ok(())
    }

    fn policies_for_flight(&self, flight: &FlightKey) -> Result<Vec<InsurancePolicy>, StoreError> {
        Ok(self
            .tables()?
            .policies
            .get(flight)
            .map(|by_passenger| by_passenger.values().cloned().collect())
            .unwrap_or_default())
    }
}

impl CreditStore for MemoryStore {
    fn get_credit(&self, passenger: &PartyId) -> Result<Amount, StoreError> {
        Ok(self
            .tables()?
            .credits
            .get(passenger)
            .copied()
            .unwrap_or(Amount::ZERO))
    }

    fn put_credit(&self, passenger: &PartyId, balance: Amount) -> Result<(), StoreError> {
        self.tables()?.credits.insert(passenger.clone(), balance);
        Ok(())
    }

    fn is_credited(&self, flight: &FlightKey, passenger: &PartyId) -> Result<bool, StoreError> {
        Ok(self
            .tables()?
            .credited
            .contains(&(flight.clone(), passenger.clone())))
    }

    fn mark_credited(&self, flight: &FlightKey, passenger: &PartyId) -> Result<(), StoreError> {
        self.tables()?
            .credited
            .insert((flight.clone(), passenger.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightsure_types::{AirlineState, Timestamp};

    fn airline(id: &str, state: AirlineState) -> AirlineRecord {
        AirlineRecord {
            id: PartyId::new(id),
            name: id.to_string(),
            state,
            funded: Amount::ZERO,
        }
    }

    fn flight() -> FlightKey {
        FlightKey::new("A1".into(), "ND1309".into(), Timestamp::new(1_700_000_000))
    }

    #[test]
    fn put_get_airline() {
        let store = MemoryStore::new();
        store
            .put_airline(&airline("A1", AirlineState::Registered))
            .unwrap();
        let got = store.get_airline(&"A1".into()).unwrap().unwrap();
        assert_eq!(got.state, AirlineState::Registered);
        assert!(store.get_airline(&"A2".into()).unwrap().is_none());
    }

    #[test]
    fn rollback_discards_writes() {
        let store = MemoryStore::new();
        store
            .put_airline(&airline("A1", AirlineState::Registered))
            .unwrap();
        store.begin().unwrap();
        store
            .put_airline(&airline("A1", AirlineState::Participant))
            .unwrap();
        store.put_credit(&"P1".into(), Amount::new(5)).unwrap();
        store.rollback().unwrap();

        let got = store.get_airline(&"A1".into()).unwrap().unwrap();
        assert_eq!(got.state, AirlineState::Registered);
        assert_eq!(store.get_credit(&"P1".into()).unwrap(), Amount::ZERO);
        assert!(!store.in_transaction());
    }

    #[test]
    fn commit_keeps_writes() {
        let store = MemoryStore::new();
        store.begin().unwrap();
        store.put_credit(&"P1".into(), Amount::new(5)).unwrap();
        store.commit().unwrap();
        assert_eq!(store.get_credit(&"P1".into()).unwrap(), Amount::new(5));
    }

    #[test]
    fn failing_commit_leaves_transaction_for_rollback() {
        let store = MemoryStore::new();
        store.set_failing_commits(true);
        store.begin().unwrap();
        store.put_credit(&"P1".into(), Amount::new(5)).unwrap();
        assert!(matches!(store.commit(), Err(StoreError::Backend(_))));
        assert!(store.in_transaction());
        store.rollback().unwrap();
        assert_eq!(store.get_credit(&"P1".into()).unwrap(), Amount::ZERO);
    }

    #[test]
    fn nested_begin_rejected() {
        let store = MemoryStore::new();
        store.begin().unwrap();
        assert!(matches!(store.begin(), Err(StoreError::TransactionOpen)));
    }

    #[test]
    fn commit_without_begin_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(store.commit(), Err(StoreError::NoTransaction)));
        assert!(matches!(store.rollback(), Err(StoreError::NoTransaction)));
    }

    #[test]
    fn policies_grouped_by_flight() {
        let store = MemoryStore::new();
        for p in ["P2", "P1"] {
            store
                .put_policy(&InsurancePolicy {
                    passenger: p.into(),
                    flight: flight(),
                    insured: Amount::new(10),
                })
                .unwrap();
        }
        let policies = store.policies_for_flight(&flight()).unwrap();
        assert_eq!(policies.len(), 2);
        assert_eq!(policies[0].passenger.as_str(), "P1");
        assert!(store
            .get_policy(&"P2".into(), &flight())
            .unwrap()
            .is_some());
    }

    #[test]
    fn credited_marker() {
        let store = MemoryStore::new();
        let p = PartyId::new("P1");
        assert!(!store.is_credited(&flight(), &p).unwrap());
        store.mark_credited(&flight(), &p).unwrap();
        assert!(store.is_credited(&flight(), &p).unwrap());
    }
}
