//! Currency transfer collaborator.
//!
//! Moving currency to a passenger is done by the hosting substrate. The core
//! only needs to ask for it, after its own state has been updated.

use crate::amount::Amount;
use crate::party::PartyId;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("transfer of {amount} to {recipient} failed: {reason}")]
pub struct TransferError {
    pub recipient: PartyId,
    pub amount: Amount,
    pub reason: String,
}

/// Sends currency out of the pooled funds.
pub trait FundsTransfer: Send + Sync {
    fn send(&self, recipient: &PartyId, amount: Amount) -> Result<(), TransferError>;
}
