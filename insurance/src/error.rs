use flightsure_store::StoreError;
use flightsure_types::{Amount, TransferError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsuranceError {
    #[error("flight {0} is not registered")]
    FlightNotFound(String),

    #[error("flight {0} is already registered")]
    FlightAlreadyRegistered(String),

    #[error("flight {0} already has a final status")]
    FlightResolved(String),

    #[error("premium {provided} below minimum {min}")]
    PremiumTooLow { min: Amount, provided: Amount },

    #[error("premium {provided} above maximum {max}")]
    PremiumTooHigh { max: Amount, provided: Amount },

    #[error("{passenger} already holds a policy on {flight}")]
    DuplicatePolicy { passenger: String, flight: String },

    #[error("flight {0} was not resolved as an airline-caused delay")]
    NotPayable(String),

    #[error("payout for {passenger} overflows (insured {insured})")]
    PayoutOverflow { passenger: String, insured: Amount },

    #[error("{0} has no credit to withdraw")]
    NothingToWithdraw(String),

    #[error("pooled funds insufficient: need {needed}, available {available}")]
    PoolInsufficient { needed: Amount, available: Amount },

    #[error("pooled funds would overflow adding {0}")]
    PoolOverflow(Amount),

    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
