//! Payout engine: crediting policyholders and withdrawals.

use crate::error::InsuranceError;
use crate::pool::PooledFunds;
use flightsure_oracles::Credit;
use flightsure_store::{CreditStore, PolicyStore};
use flightsure_types::{Amount, FlightKey, PartyId, ProtocolParams, StatusCode};
use std::sync::Arc;
use tracing::{info, warn};

/// Owns passenger balances and the credited-pair markers; reads policies.
pub struct PayoutEngine<S> {
    store: Arc<S>,
    payout_multiple_bps: u32,
}

impl<S: PolicyStore + CreditStore> PayoutEngine<S> {
    pub fn new(store: Arc<S>, params: &ProtocolParams) -> Self {
        Self {
            store,
            payout_multiple_bps: params.payout_multiple_bps,
        }
    }

    /// Credit every policyholder on an airline-fault flight not credited before.
    ///
    /// Idempotent: each (flight, passenger) pair is marked when credited and
    /// skipped on every later call.
    pub fn credit_insurees(&self, flight: &FlightKey) -> Result<Vec<Credit>, InsuranceError> {
        let record = self
            .store
            .get_flight(flight)?
            .ok_or_else(|| InsuranceError::FlightNotFound(flight.to_string()))?;
        if record.status != Some(StatusCode::LateAirline) {
            return Err(InsuranceError::NotPayable(flight.to_string()));
        }

        let mut credited = Vec::new();
        for policy in self.store.policies_for_flight(flight)? {
            if self.store.is_credited(flight, &policy.passenger)? {
                continue;
            }
            let overflow = || InsuranceError::PayoutOverflow {
                passenger: policy.passenger.to_string(),
                insured: policy.insured,
            };
            let payout = policy
                .insured
                .checked_mul_bps(self.payout_multiple_bps)
                .ok_or_else(overflow)?;
            let balance = self
                .store
                .get_credit(&policy.passenger)?
                .checked_add(payout)
                .ok_or_else(overflow)?;

            self.store.put_credit(&policy.passenger, balance)?;
            self.store.mark_credited(flight, &policy.passenger)?;
            info!(passenger = %policy.passenger, flight = %flight, %payout, "insuree credited");
            credited.push(Credit {
                passenger: policy.passenger,
                amount: payout,
            });
        }
        Ok(credited)
    }

    /// Debit `passenger`'s whole balance ahead of paying it out.
    ///
    /// Zeroes the balance and takes the amount out of `pool`. The caller
    /// commits this before handing the amount to the funds transfer, and
    /// undoes it with [`PayoutEngine::restore`] if the transfer fails.
    pub fn debit(&self, passenger: &PartyId, pool: &PooledFunds) -> Result<Amount, InsuranceError> {
        let balance = self.store.get_credit(passenger)?;
        if balance.is_zero() {
            return Err(InsuranceError::NothingToWithdraw(passenger.to_string()));
        }
        let available = pool.balance();
        if available < balance {
            return Err(InsuranceError::PoolInsufficient {
                needed: balance,
                available,
            });
        }

        self.store.put_credit(passenger, Amount::ZERO)?;
        pool.withdraw(balance)?;
        info!(passenger = %passenger, amount = %balance, "credit debited for withdrawal");
        Ok(balance)
    }

    /// Give back a debited `amount` whose transfer did not go through.
    pub fn restore(
        &self,
        passenger: &PartyId,
        amount: Amount,
        pool: &PooledFunds,
    ) -> Result<Amount, InsuranceError> {
        let balance = self
            .store
            .get_credit(passenger)?
            .checked_add(amount)
            .ok_or_else(|| InsuranceError::PayoutOverflow {
                passenger: passenger.to_string(),
                insured: amount,
            })?;
        self.store.put_credit(passenger, balance)?;
        pool.deposit(amount)?;
        warn!(passenger = %passenger, %amount, "withdrawal reversed, credit restored");
        Ok(balance)
    }

    pub fn credit(&self, passenger: &PartyId) -> Result<Amount, InsuranceError> {
        Ok(self.store.get_credit(passenger)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InsuranceLedger;
    use flightsure_nullables::MemoryStore;
    use flightsure_types::Timestamp;

    fn flight() -> FlightKey {
        FlightKey::new("A1".into(), "ND1309".into(), Timestamp::new(1_700_000_000))
    }

    struct Fixture {
        _ledger: InsuranceLedger<MemoryStore>,
        payout: PayoutEngine<MemoryStore>,
        pool: PooledFunds,
    }

    fn fixture(status: StatusCode) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let params = ProtocolParams::default();
        let ledger = InsuranceLedger::new(Arc::clone(&store), &params);
        let payout = PayoutEngine::new(store, &params);
        let pool = PooledFunds::default();
        ledger.register_flight(&flight()).unwrap();
        for (p, gwei) in [("P1", 1_000), ("P2", 2_000)] {
            let amount = Amount::new(gwei);
            ledger.buy_policy(&p.into(), &flight(), amount).unwrap();
            pool.deposit(amount).unwrap();
        }
        ledger.record_status(&flight(), status).unwrap();
        Fixture {
            _ledger: ledger,
            payout,
            pool,
        }
    }

    #[test]
    fn credits_one_and_a_half_times_insured() {
        let f = fixture(StatusCode::LateAirline);
        let credited = f.payout.credit_insurees(&flight()).unwrap();
        assert_eq!(credited.len(), 2);
        assert_eq!(f.payout.credit(&"P1".into()).unwrap(), Amount::new(1_500));
        assert_eq!(f.payout.credit(&"P2".into()).unwrap(), Amount::new(3_000));
    }

    #[test]
    fn repeated_credit_is_idempotent() {
        let f = fixture(StatusCode::LateAirline);
        f.payout.credit_insurees(&flight()).unwrap();
        let again = f.payout.credit_insurees(&flight()).unwrap();
        assert!(again.is_empty());
        assert_eq!(f.payout.credit(&"P1".into()).unwrap(), Amount::new(1_500));
    }

    #[test]
    fn non_fault_flight_not_payable() {
        let f = fixture(StatusCode::LateWeather);
        let err = f.payout.credit_insurees(&flight()).unwrap_err();
        assert!(matches!(err, InsuranceError::NotPayable(_)));
        assert_eq!(f.payout.credit(&"P1".into()).unwrap(), Amount::ZERO);
    }

    #[test]
    fn debit_zeroes_balance_and_pool() {
        let f = fixture(StatusCode::LateAirline);
        f.payout.credit_insurees(&flight()).unwrap();
        let paid = f.payout.debit(&"P1".into(), &f.pool).unwrap();
        assert_eq!(paid, Amount::new(1_500));
        assert_eq!(f.payout.credit(&"P1".into()).unwrap(), Amount::ZERO);
        assert_eq!(f.pool.balance(), Amount::new(1_500));

        let err = f.payout.debit(&"P1".into(), &f.pool).unwrap_err();
        assert!(matches!(err, InsuranceError::NothingToWithdraw(_)));
    }

    #[test]
    fn debit_bounded_by_pool() {
        let f = fixture(StatusCode::LateAirline);
        f.payout.credit_insurees(&flight()).unwrap();
        // Pool holds 3_000; P2 is owed 3_000 and P1 1_500.
        f.payout.debit(&"P2".into(), &f.pool).unwrap();
        let err = f.payout.debit(&"P1".into(), &f.pool).unwrap_err();
        assert!(matches!(err, InsuranceError::PoolInsufficient { .. }));
        assert_eq!(f.payout.credit(&"P1".into()).unwrap(), Amount::new(1_500));
        assert_eq!(f.pool.balance(), Amount::ZERO);
    }

    #[test]
    fn restore_undoes_debit() {
        let f = fixture(StatusCode::LateAirline);
        f.payout.credit_insurees(&flight()).unwrap();
        let paid = f.payout.debit(&"P1".into(), &f.pool).unwrap();
        let balance = f.payout.restore(&"P1".into(), paid, &f.pool).unwrap();
        assert_eq!(balance, Amount::new(1_500));
        assert_eq!(f.payout.credit(&"P1".into()).unwrap(), Amount::new(1_500));
        assert_eq!(f.pool.balance(), Amount::new(3_000));
    }
}
