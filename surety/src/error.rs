use flightsure_admission::AdmissionError;
use flightsure_insurance::InsuranceError;
use flightsure_oracles::{OracleError, SettlementError};
use flightsure_random::RandomError;
use flightsure_store::StoreError;
use flightsure_types::{TransferError, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuretyError {
    #[error("contract is not operational")]
    NotOperational,

    #[error("caller {0} is not authorized")]
    Unauthorized(String),

    #[error("caller {0} is not the owner")]
    NotOwner(String),

    #[error("airline {0} is not a participant")]
    NotParticipant(String),

    #[error("operational status is already {0}")]
    OperationalUnchanged(bool),

    #[error("caller {0} is already authorized")]
    AlreadyAuthorized(String),

    #[error("caller {0} was not authorized")]
    CallerNotFound(String),

    #[error("admission error: {0}")]
    Admission(#[from] AdmissionError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("insurance error: {0}")]
    Insurance(#[from] InsuranceError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid value: {0}")]
    Types(#[from] TypesError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),
}

/// Coarse error taxonomy surfaced to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The system is paused. Reported ahead of every other failure.
    Operational,
    Authorization,
    /// The operation does not apply to the entity's current lifecycle state.
    State,
    Duplicate,
    InsufficientFunds,
    NotFound,
    /// The storage substrate or randomness source failed.
    Storage,
    Transfer,
    Config,
}

impl SuretyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOperational => ErrorKind::Operational,
            Self::Unauthorized(_) | Self::NotOwner(_) | Self::NotParticipant(_) => {
                ErrorKind::Authorization
            }
            Self::OperationalUnchanged(_) => ErrorKind::State,
            Self::AlreadyAuthorized(_) => ErrorKind::Duplicate,
            Self::CallerNotFound(_) => ErrorKind::NotFound,
            Self::Admission(e) => admission_kind(e),
            Self::Oracle(e) => oracle_kind(e),
            Self::Insurance(e) => insurance_kind(e),
            Self::Store(_) => ErrorKind::Storage,
            Self::Types(_) | Self::Config(_) | Self::Logging(_) => ErrorKind::Config,
        }
    }
}

fn admission_kind(e: &AdmissionError) -> ErrorKind {
    match e {
        AdmissionError::ProposerNotParticipant(_) | AdmissionError::VoterNotParticipant(_) => {
            ErrorKind::Authorization
        }
        AdmissionError::AlreadyProposed { .. } | AdmissionError::AlreadyVoted { .. } => {
            ErrorKind::Duplicate
        }
        AdmissionError::AirlineNotFound(_) => ErrorKind::NotFound,
        AdmissionError::NotPending { .. }
        | AdmissionError::NotRegistered { .. }
        | AdmissionError::AlreadyFunded(_)
        | AdmissionError::IllegalTransition { .. }
        | AdmissionError::AlreadyBootstrapped => ErrorKind::State,
        AdmissionError::InsufficientFunding { .. } => ErrorKind::InsufficientFunds,
        AdmissionError::Store(_) => ErrorKind::Storage,
    }
}

fn oracle_kind(e: &OracleError) -> ErrorKind {
    match e {
        OracleError::InsufficientFee { .. } => ErrorKind::InsufficientFunds,
        OracleError::AlreadyRegistered(_)
        | OracleError::RequestAlreadyOpen(_)
        | OracleError::DuplicateResponse { .. } => ErrorKind::Duplicate,
        OracleError::NotRegistered(_) | OracleError::RequestNotFound(_) => ErrorKind::NotFound,
        OracleError::IndexNotAssigned { .. } => ErrorKind::Authorization,
        OracleError::RequestResolved(_) => ErrorKind::State,
        OracleError::Random(RandomError::Unavailable(_)) => ErrorKind::Storage,
        OracleError::Random(_) => ErrorKind::Config,
        OracleError::Settlement(SettlementError::Store(_)) | OracleError::Store(_) => {
            ErrorKind::Storage
        }
        OracleError::Settlement(_) => ErrorKind::State,
    }
}

fn insurance_kind(e: &InsuranceError) -> ErrorKind {
    match e {
        InsuranceError::FlightNotFound(_) => ErrorKind::NotFound,
        InsuranceError::FlightAlreadyRegistered(_) | InsuranceError::DuplicatePolicy { .. } => {
            ErrorKind::Duplicate
        }
        InsuranceError::FlightResolved(_)
        | InsuranceError::NotPayable(_)
        | InsuranceError::PayoutOverflow { .. }
        | InsuranceError::PoolOverflow(_) => ErrorKind::State,
        InsuranceError::PremiumTooLow { .. }
        | InsuranceError::PremiumTooHigh { .. }
        | InsuranceError::NothingToWithdraw(_)
        | InsuranceError::PoolInsufficient { .. } => ErrorKind::InsufficientFunds,
        InsuranceError::Transfer(_) => ErrorKind::Transfer,
        InsuranceError::Store(_) => ErrorKind::Storage,
    }
}

impl From<TransferError> for SuretyError {
    fn from(e: TransferError) -> Self {
        Self::Insurance(InsuranceError::Transfer(e))
    }
}
