//! The FlightSurety facade.

use crate::auth::Authorizer;
use crate::config::SuretyConfig;
use crate::error::SuretyError;
use crate::events::{EventBus, SuretyEvent};
use flightsure_admission::{AdmissionController, ProposalOutcome, VoteOutcome};
use flightsure_insurance::{InsuranceError, InsuranceLedger, InsuranceSettlement, PayoutEngine, PooledFunds};
use flightsure_oracles::{Credit, ResponseAggregator, ResponseOutcome};
use flightsure_random::RandomnessProvider;
use flightsure_store::{AirlineRecord, InsurancePolicy, RequestKey, StatusRequest, Store, StoreError};
use flightsure_types::{
    AirlineState, Amount, FlightCode, FlightKey, FundsTransfer, PartyId, StatusCode, Timestamp,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{error, info, warn};

/// External collaborators the facade calls out to.
pub struct Collaborators {
    pub rng: Arc<dyn RandomnessProvider>,
    pub transfer: Arc<dyn FundsTransfer>,
    pub authorizer: Arc<dyn Authorizer>,
}

/// Side effects of a transaction that become visible only once it commits.
#[derive(Default)]
struct Effects {
    events: Vec<SuretyEvent>,
    deposited: Amount,
    withdrawn: Amount,
}

/// Entry point to the whole system.
///
/// Mutations are serialized by a single writer lock and each runs inside one
/// store transaction. Queries, including the pooled-funds balance, take the
/// read side and so only ever observe committed state.
pub struct FlightSurety<S> {
    store: Arc<S>,
    operational: AtomicBool,
    writer: RwLock<()>,
    authorizer: Arc<dyn Authorizer>,
    transfer: Arc<dyn FundsTransfer>,
    admission: AdmissionController<S>,
    oracles: ResponseAggregator<S>,
    ledger: InsuranceLedger<S>,
    payout: PayoutEngine<S>,
    pool: PooledFunds,
    events: EventBus,
}

impl<S: Store> FlightSurety<S> {
    /// Build the facade over `store` and admit the owner's airline as the
    /// founding Participant unless the store already holds admitted airlines.
    pub fn new(
        store: Arc<S>,
        config: &SuretyConfig,
        collaborators: Collaborators,
    ) -> Result<Self, SuretyError> {
        let owner = config.owner_id()?;
        let params = config.params.clone();
        let surety = Self {
            admission: AdmissionController::new(Arc::clone(&store), params.clone()),
            oracles: ResponseAggregator::new(Arc::clone(&store), collaborators.rng, &params),
            ledger: InsuranceLedger::new(Arc::clone(&store), &params),
            payout: PayoutEngine::new(Arc::clone(&store), &params),
            store,
            operational: AtomicBool::new(true),
            writer: RwLock::new(()),
            authorizer: collaborators.authorizer,
            transfer: collaborators.transfer,
            pool: PooledFunds::default(),
            events: EventBus::new(),
        };

        if surety.admission.registered_airline_count()? == 0 {
            let _guard = surety.write_lock()?;
            surety.transact(|_| {
                Ok(surety
                    .admission
                    .admit_founder(&owner, &config.owner_airline_name)?)
            })?;
        }
        info!(owner = %owner, "flight surety ready");
        Ok(surety)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ── Admission ───────────────────────────────────────────────────────

    pub fn propose_airline(
        &self,
        caller: &PartyId,
        airline: &PartyId,
        name: &str,
        proposer: &PartyId,
    ) -> Result<ProposalOutcome, SuretyError> {
        self.mutate(caller, "propose_airline", |fx| {
            let outcome = self.admission.propose_airline(airline, name, proposer)?;
            fx.events.push(SuretyEvent::AirlineProposed {
                airline: airline.clone(),
                proposer: proposer.clone(),
            });
            if outcome == ProposalOutcome::Registered {
                fx.events.push(SuretyEvent::AirlineRegistered {
                    airline: airline.clone(),
                    votes: 1,
                });
            }
            Ok(outcome)
        })
    }

    pub fn cast_vote(
        &self,
        caller: &PartyId,
        airline: &PartyId,
        voter: &PartyId,
    ) -> Result<VoteOutcome, SuretyError> {
        self.mutate(caller, "cast_vote", |fx| {
            let outcome = self.admission.cast_vote(airline, voter)?;
            let votes = match outcome {
                VoteOutcome::Recorded { votes, .. } | VoteOutcome::Registered { votes } => votes,
            };
            fx.events.push(SuretyEvent::AirlineVoted {
                airline: airline.clone(),
                voter: voter.clone(),
                votes,
            });
            if let VoteOutcome::Registered { votes } = outcome {
                fx.events.push(SuretyEvent::AirlineRegistered {
                    airline: airline.clone(),
                    votes,
                });
            }
            Ok(outcome)
        })
    }

    pub fn fund_airline(
        &self,
        caller: &PartyId,
        airline: &PartyId,
        amount: Amount,
    ) -> Result<(), SuretyError> {
        self.mutate(caller, "fund_airline", |fx| {
            let funding = self.admission.fund_airline(airline, amount)?;
            self.deposit(fx, funding.contributed)?;
            fx.events.push(SuretyEvent::AirlineFunded {
                airline: airline.clone(),
                amount: funding.contributed,
            });
            Ok(())
        })
    }

    // ── Oracles ─────────────────────────────────────────────────────────

    /// Register `oracle` against `fee` and return its sampling indexes.
    pub fn register_oracle(
        &self,
        caller: &PartyId,
        oracle: &PartyId,
        fee: Amount,
    ) -> Result<Vec<u8>, SuretyError> {
        self.mutate(caller, "register_oracle", |fx| {
            let indexes = self.oracles.register_oracle(oracle, fee)?;
            fx.events.push(SuretyEvent::OracleRegistered {
                oracle: oracle.clone(),
                indexes: indexes.clone(),
            });
            Ok(indexes)
        })
    }

    /// Ask oracles for the status of a flight on behalf of `requester`.
    pub fn open_request(
        &self,
        caller: &PartyId,
        requester: &PartyId,
        airline: &PartyId,
        flight: &FlightCode,
        timestamp: Timestamp,
    ) -> Result<RequestKey, SuretyError> {
        let flight_key = FlightKey::new(airline.clone(), flight.clone(), timestamp);
        self.mutate(caller, "open_request", |fx| {
            let key = self.oracles.open_request(&flight_key, requester)?;
            fx.events.push(SuretyEvent::OracleRequestOpened {
                index: key.index,
                airline: airline.clone(),
                flight: flight.clone(),
                timestamp,
            });
            Ok(key)
        })
    }

    /// Record an oracle's report. The response that completes a quorum
    /// resolves the flight and, on an airline-caused delay, credits insurees.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_response(
        &self,
        caller: &PartyId,
        oracle: &PartyId,
        index: u8,
        airline: &PartyId,
        flight: &FlightCode,
        timestamp: Timestamp,
        status: StatusCode,
    ) -> Result<ResponseOutcome, SuretyError> {
        let key = RequestKey {
            index,
            flight: FlightKey::new(airline.clone(), flight.clone(), timestamp),
        };
        self.mutate(caller, "submit_response", |fx| {
            let settlement = InsuranceSettlement::new(&self.ledger, &self.payout);
            let outcome = self
                .oracles
                .submit_response(oracle, &key, status, &settlement)?;
            fx.events.push(SuretyEvent::OracleResponseRecorded {
                oracle: oracle.clone(),
                airline: airline.clone(),
                flight: flight.clone(),
                timestamp,
                status,
            });
            if let Some(resolution) = &outcome.resolution {
                fx.events.push(SuretyEvent::FlightStatusResolved {
                    airline: airline.clone(),
                    flight: flight.clone(),
                    timestamp,
                    status: resolution.status,
                });
                push_credits(fx, &resolution.credited);
            }
            Ok(outcome)
        })
    }

    // ── Insurance ───────────────────────────────────────────────────────

    /// Register a departure of a Participant airline for sale.
    pub fn register_flight(
        &self,
        caller: &PartyId,
        airline: &PartyId,
        flight: &FlightCode,
        timestamp: Timestamp,
    ) -> Result<FlightKey, SuretyError> {
        let key = FlightKey::new(airline.clone(), flight.clone(), timestamp);
        self.mutate(caller, "register_flight", |fx| {
            if !self.admission.is_participant(airline)? {
                return Err(SuretyError::NotParticipant(airline.to_string()));
            }
            self.ledger.register_flight(&key)?;
            fx.events.push(SuretyEvent::FlightRegistered {
                airline: airline.clone(),
                flight: flight.clone(),
                timestamp,
            });
            Ok(key.clone())
        })
    }

    pub fn buy_policy(
        &self,
        caller: &PartyId,
        passenger: &PartyId,
        airline: &PartyId,
        flight: &FlightCode,
        timestamp: Timestamp,
        amount: Amount,
    ) -> Result<InsurancePolicy, SuretyError> {
        let key = FlightKey::new(airline.clone(), flight.clone(), timestamp);
        self.mutate(caller, "buy_policy", |fx| {
            let policy = self.ledger.buy_policy(passenger, &key, amount)?;
            self.deposit(fx, amount)?;
            fx.events.push(SuretyEvent::PolicyPurchased {
                passenger: passenger.clone(),
                airline: airline.clone(),
                flight: flight.clone(),
                timestamp,
                amount,
            });
            Ok(policy)
        })
    }

    /// Credit policyholders of a flight resolved as an airline-caused delay.
    /// Passengers credited before are skipped.
    pub fn credit_insurees(
        &self,
        caller: &PartyId,
        airline: &PartyId,
        flight: &FlightCode,
        timestamp: Timestamp,
    ) -> Result<Vec<Credit>, SuretyError> {
        let key = FlightKey::new(airline.clone(), flight.clone(), timestamp);
        self.mutate(caller, "credit_insurees", |fx| {
            let credited = self.payout.credit_insurees(&key)?;
            push_credits(fx, &credited);
            Ok(credited)
        })
    }

    /// Pay out `passenger`'s whole credit balance.
    ///
    /// The debit commits before the transfer is requested. A failed transfer
    /// is undone by a second transaction that restores the credit and the
    /// pooled funds.
    pub fn withdraw(&self, caller: &PartyId, passenger: &PartyId) -> Result<Amount, SuretyError> {
        self.gated(caller, "withdraw", |events| {
            let (amount, _) = self.transact(|fx| {
                let amount = self.payout.debit(passenger, &self.pool)?;
                fx.withdrawn = amount;
                Ok(amount)
            })?;

            if let Err(e) = self.transfer.send(passenger, amount) {
                warn!(passenger = %passenger, %amount, error = %e, "withdrawal transfer failed");
                if let Err(restore) = self.transact(|fx| {
                    self.payout.restore(passenger, amount, &self.pool)?;
                    fx.deposited = amount;
                    Ok(())
                }) {
                    error!(passenger = %passenger, %amount, error = %restore, "could not restore credit after failed transfer");
                    return Err(restore);
                }
                return Err(InsuranceError::from(e).into());
            }

            events.push(SuretyEvent::Withdrawn {
                passenger: passenger.clone(),
                amount,
            });
            Ok(amount)
        })
    }

    // ── Administration ──────────────────────────────────────────────────

    /// Pause or resume every mutating entry point. Owner only, and the one
    /// mutation not gated by the operational flag.
    pub fn set_operational(&self, caller: &PartyId, operational: bool) -> Result<(), SuretyError> {
        if !self.authorizer.is_owner(caller) {
            warn!(caller = %caller, "set_operational rejected: not owner");
            return Err(SuretyError::NotOwner(caller.to_string()));
        }
        {
            let _guard = self.write_lock()?;
            if self.operational.load(Ordering::SeqCst) == operational {
                return Err(SuretyError::OperationalUnchanged(operational));
            }
            self.operational.store(operational, Ordering::SeqCst);
        }
        info!(operational, "operational status changed");
        self.events
            .emit(&SuretyEvent::OperationalStatusChanged { operational });
        Ok(())
    }

    pub fn authorize_caller(&self, caller: &PartyId, target: &PartyId) -> Result<(), SuretyError> {
        self.administer(caller, || {
            if !self.authorizer.authorize(target) {
                return Err(SuretyError::AlreadyAuthorized(target.to_string()));
            }
            Ok(())
        })
    }

    pub fn deauthorize_caller(
        &self,
        caller: &PartyId,
        target: &PartyId,
    ) -> Result<(), SuretyError> {
        self.administer(caller, || {
            if !self.authorizer.deauthorize(target) {
                return Err(SuretyError::CallerNotFound(target.to_string()));
            }
            Ok(())
        })
    }

    // ── Queries ─────────────────────────────────────────────────────────
    //
    // Queries never fail: a missing entity or an unreadable store yields the
    // default value.

    pub fn is_operational(&self) -> bool {
        self.operational.load(Ordering::SeqCst)
    }

    pub fn is_authorized_caller(&self, id: &PartyId) -> bool {
        self.authorizer.is_authorized(id)
    }

    pub fn airline_state(&self, id: &PartyId) -> AirlineState {
        self.query("airline_state", || Ok(self.admission.airline_state(id)?))
    }

    /// Full record for an airline, including its display name.
    pub fn airline(&self, id: &PartyId) -> Option<AirlineRecord> {
        self.query("airline", || Ok(self.admission.airline(id)?))
    }

    pub fn vote_count(&self, id: &PartyId) -> u32 {
        self.query("vote_count", || Ok(self.admission.vote_count(id)?))
    }

    pub fn registered_airline_count(&self) -> u32 {
        self.query("registered_airline_count", || {
            Ok(self.admission.registered_airline_count()?)
        })
    }

    pub fn is_airline_funded(&self, id: &PartyId) -> bool {
        self.query("is_airline_funded", || Ok(self.admission.is_participant(id)?))
    }

    pub fn passenger_credit(&self, id: &PartyId) -> Amount {
        self.query("passenger_credit", || Ok(self.payout.credit(id)?))
    }

    pub fn oracle_indexes(&self, oracle: &PartyId) -> Vec<u8> {
        self.query("oracle_indexes", || Ok(self.oracles.oracle_indexes(oracle)?))
    }

    pub fn oracle_count(&self) -> u64 {
        self.query("oracle_count", || Ok(self.oracles.oracle_count()?))
    }

    pub fn pooled_funds(&self) -> Amount {
        self.query("pooled_funds", || Ok(self.pool.balance()))
    }

    pub fn policy(&self, passenger: &PartyId, flight: &FlightKey) -> Option<InsurancePolicy> {
        self.query("policy", || Ok(self.ledger.policy(passenger, flight)?))
    }

    /// Resolved status of a registered flight; `Unknown` until resolved.
    pub fn flight_status(&self, flight: &FlightKey) -> StatusCode {
        self.query("flight_status", || {
            Ok(self
                .ledger
                .flight(flight)?
                .and_then(|f| f.status)
                .unwrap_or_default())
        })
    }

    pub fn request_status(&self, key: &RequestKey) -> Option<StatusRequest> {
        self.query("request_status", || Ok(self.oracles.request(key)?))
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, ()>, SuretyError> {
        self.writer
            .write()
            .map_err(|_| StoreError::Backend("writer lock poisoned".into()).into())
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, ()>, SuretyError> {
        self.writer
            .read()
            .map_err(|_| StoreError::Backend("writer lock poisoned".into()).into())
    }

    fn ensure_operational(&self) -> Result<(), SuretyError> {
        if self.is_operational() {
            Ok(())
        } else {
            Err(SuretyError::NotOperational)
        }
    }

    /// Gate, then run `op` as one transaction.
    fn mutate<T>(
        &self,
        caller: &PartyId,
        name: &'static str,
        op: impl FnOnce(&mut Effects) -> Result<T, SuretyError>,
    ) -> Result<T, SuretyError> {
        self.gated(caller, name, |events| {
            let (value, mut effects) = self.transact(op)?;
            events.append(&mut effects.events);
            Ok(value)
        })
    }

    /// Check the operational flag, then the caller, then run `body` under the
    /// writer lock. Events `body` collects are emitted after the lock is
    /// released, and only if it succeeds.
    fn gated<T>(
        &self,
        caller: &PartyId,
        name: &'static str,
        body: impl FnOnce(&mut Vec<SuretyEvent>) -> Result<T, SuretyError>,
    ) -> Result<T, SuretyError> {
        let result = self.ensure_operational().and_then(|()| {
            if !self.authorizer.is_authorized(caller) {
                return Err(SuretyError::Unauthorized(caller.to_string()));
            }
            let guard = self.write_lock()?;
            // The system may have been paused while this call waited.
            self.ensure_operational()?;

            let mut events = Vec::new();
            let outcome = body(&mut events);
            drop(guard);

            let value = outcome?;
            for event in &events {
                self.events.emit(event);
            }
            Ok(value)
        });

        if let Err(e) = &result {
            warn!(op = name, caller = %caller, kind = ?e.kind(), error = %e, "operation rejected");
        }
        result
    }

    /// Run `op` as one store transaction. The caller holds the writer lock.
    /// On failure the transaction is rolled back and pooled-funds movements
    /// recorded in the effects are reversed.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut Effects) -> Result<T, SuretyError>,
    ) -> Result<(T, Effects), SuretyError> {
        self.store.begin()?;
        let mut effects = Effects::default();
        let committed = op(&mut effects).and_then(|value| {
            self.store.commit()?;
            Ok(value)
        });
        match committed {
            Ok(value) => Ok((value, effects)),
            Err(e) => {
                self.rollback();
                self.unwind_pool(&effects);
                Err(e)
            }
        }
    }

    /// Owner-only mutation outside the store.
    fn administer(
        &self,
        caller: &PartyId,
        op: impl FnOnce() -> Result<(), SuretyError>,
    ) -> Result<(), SuretyError> {
        self.ensure_operational()?;
        if !self.authorizer.is_owner(caller) {
            return Err(SuretyError::NotOwner(caller.to_string()));
        }
        let _guard = self.write_lock()?;
        op()
    }

    fn query<T: Default>(
        &self,
        name: &'static str,
        read: impl FnOnce() -> Result<T, SuretyError>,
    ) -> T {
        match self.read_lock().and_then(|_guard| read()) {
            Ok(value) => value,
            Err(e) => {
                warn!(query = name, error = %e, "query failed, returning default");
                T::default()
            }
        }
    }

    fn deposit(&self, effects: &mut Effects, amount: Amount) -> Result<(), SuretyError> {
        self.pool.deposit(amount)?;
        effects.deposited = effects.deposited + amount;
        Ok(())
    }

    fn unwind_pool(&self, effects: &Effects) {
        if !effects.deposited.is_zero() {
            if let Err(e) = self.pool.withdraw(effects.deposited) {
                error!(amount = %effects.deposited, error = %e, "could not reverse pooled-funds deposit");
            }
        }
        if !effects.withdrawn.is_zero() {
            if let Err(e) = self.pool.deposit(effects.withdrawn) {
                error!(amount = %effects.withdrawn, error = %e, "could not reverse pooled-funds debit");
            }
        }
    }

    fn rollback(&self) {
        if let Err(e) = self.store.rollback() {
            error!(error = %e, "store rollback failed");
        }
    }
}

fn push_credits(fx: &mut Effects, credited: &[Credit]) {
    fx.events
        .extend(credited.iter().map(|c| SuretyEvent::InsureeCredited {
            passenger: c.passenger.clone(),
            amount: c.amount,
        }));
}
