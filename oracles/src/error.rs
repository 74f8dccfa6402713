use crate::settlement::SettlementError;
use flightsure_random::RandomError;
use flightsure_store::StoreError;
use flightsure_types::Amount;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("insufficient registration fee: need {needed}, provided {provided}")]
    InsufficientFee { needed: Amount, provided: Amount },

    #[error("oracle {0} is already registered")]
    AlreadyRegistered(String),

    #[error("oracle {0} is not registered")]
    NotRegistered(String),

    #[error("oracle {oracle} does not hold index {index}")]
    IndexNotAssigned { oracle: String, index: u8 },

    #[error("no status request open for {0}")]
    RequestNotFound(String),

    #[error("status request {0} is already open")]
    RequestAlreadyOpen(String),

    #[error("status request {0} is already resolved")]
    RequestResolved(String),

    #[error("oracle {oracle} already reported {status} for {request}")]
    DuplicateResponse {
        oracle: String,
        status: String,
        request: String,
    },

    #[error("randomness error: {0}")]
    Random(#[from] RandomError),

    #[error("settlement error: {0}")]
    Settlement(#[from] SettlementError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
