//! Fundamental types for FlightSurety.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! party identities, amounts, timestamps, flight keys, oracle status codes,
//! the airline lifecycle and the protocol parameters.

pub mod amount;
pub mod error;
pub mod flight;
pub mod params;
pub mod party;
pub mod state;
pub mod time;
pub mod transfer;

pub use amount::Amount;
pub use error::TypesError;
pub use flight::{FlightCode, FlightId, FlightKey, StatusCode};
pub use params::ProtocolParams;
pub use party::PartyId;
pub use state::AirlineState;
pub use time::Timestamp;
pub use transfer::{FundsTransfer, TransferError};
