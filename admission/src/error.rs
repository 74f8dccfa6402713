use flightsure_store::StoreError;
use flightsure_types::{AirlineState, Amount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("proposer {0} is not a participant airline")]
    ProposerNotParticipant(String),

    #[error("voter {0} is not a participant airline")]
    VoterNotParticipant(String),

    #[error("airline {airline} was already proposed (state {state:?})")]
    AlreadyProposed { airline: String, state: AirlineState },

    #[error("airline {0} not found")]
    AirlineNotFound(String),

    #[error("airline {airline} is {state:?}, not pending a vote")]
    NotPending { airline: String, state: AirlineState },

    #[error("airline {airline} is {state:?}, only registered airlines can fund")]
    NotRegistered { airline: String, state: AirlineState },

    #[error("{voter} has already voted for {airline}")]
    AlreadyVoted { voter: String, airline: String },

    #[error("airline {0} is already funded")]
    AlreadyFunded(String),

    #[error("insufficient funding: need {needed}, provided {provided}")]
    InsufficientFunding { needed: Amount, provided: Amount },

    #[error("illegal airline transition {from:?} -> {to:?}")]
    IllegalTransition { from: AirlineState, to: AirlineState },

    #[error("founding airline already admitted")]
    AlreadyBootstrapped,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
