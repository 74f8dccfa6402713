//! Pooled funds: the single shared accumulator of funding and premiums.

use crate::error::InsuranceError;
use flightsure_types::Amount;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counter of all currency held by the system.
///
/// Every update is a single compare-and-swap, so concurrent funding, purchases
/// and withdrawals never lose an update and never drive the balance negative.
#[derive(Debug, Default)]
pub struct PooledFunds {
    balance: AtomicU64,
}

impl PooledFunds {
    pub fn new(initial: Amount) -> Self {
        Self {
            balance: AtomicU64::new(initial.raw()),
        }
    }

    pub fn balance(&self) -> Amount {
        Amount::new(self.balance.load(Ordering::SeqCst))
    }

    /// Add `amount`, returning the new balance.
    pub fn deposit(&self, amount: Amount) -> Result<Amount, InsuranceError> {
        self.balance
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |b| {
                b.checked_add(amount.raw())
            })
            .map(|prev| Amount::new(prev + amount.raw()))
            .map_err(|_| InsuranceError::PoolOverflow(amount))
    }

    /// Remove `amount`, returning the new balance. Fails without effect if the
    /// pool holds less.
    pub fn withdraw(&self, amount: Amount) -> Result<Amount, InsuranceError> {
        self.balance
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |b| {
                b.checked_sub(amount.raw())
            })
            .map(|prev| Amount::new(prev - amount.raw()))
            .map_err(|available| InsuranceError::PoolInsufficient {
                needed: amount,
                available: Amount::new(available),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn deposit_then_withdraw() {
        let pool = PooledFunds::default();
        assert_eq!(pool.deposit(Amount::new(10)).unwrap(), Amount::new(10));
        assert_eq!(pool.withdraw(Amount::new(4)).unwrap(), Amount::new(6));
        assert_eq!(pool.balance(), Amount::new(6));
    }

    #[test]
    fn overdraw_rejected_without_effect() {
        let pool = PooledFunds::new(Amount::new(3));
        let err = pool.withdraw(Amount::new(4)).unwrap_err();
        assert!(matches!(err, InsuranceError::PoolInsufficient { .. }));
        assert_eq!(pool.balance(), Amount::new(3));
    }

    #[test]
    fn overflow_rejected_without_effect() {
        let pool = PooledFunds::new(Amount::new(u64::MAX));
        assert!(pool.deposit(Amount::new(1)).is_err());
        assert_eq!(pool.balance(), Amount::new(u64::MAX));
    }

    #[test]
    fn concurrent_deposits_are_not_lost() {
        let pool = Arc::new(PooledFunds::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        pool.deposit(Amount::new(1)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(pool.balance(), Amount::new(8_000));
    }
}
