//! Errors raised while constructing or parsing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown flight status code: {0}")]
    UnknownStatusCode(u8),

    #[error("invalid party id: {0:?}")]
    InvalidPartyId(String),

    #[error("invalid flight code: {0:?}")]
    InvalidFlightCode(String),
}
