//! Nullable funds transfer: record payments without moving currency.

use flightsure_types::{Amount, FundsTransfer, PartyId, TransferError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Records every transfer; can be switched to fail on demand.
#[derive(Default)]
pub struct NullTransfer {
    sent: Mutex<Vec<(PartyId, Amount)>>,
    failing: AtomicBool,
}

impl NullTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent transfers fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All successful transfers, in order (for assertions).
    pub fn sent(&self) -> Vec<(PartyId, Amount)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl FundsTransfer for NullTransfer {
    fn send(&self, recipient: &PartyId, amount: Amount) -> Result<(), TransferError> {
        let fail = |reason: &str| TransferError {
            recipient: recipient.clone(),
            amount,
            reason: reason.to_string(),
        };
        if self.failing.load(Ordering::SeqCst) {
            return Err(fail("null transfer set to fail"));
        }
        self.sent
            .lock()
            .map_err(|_| fail("null transfer lock poisoned"))?
            .push((recipient.clone(), amount));
        Ok(())
    }
}
