//! Flight-status oracles.
//!
//! Oracles pay a fee to register and receive three distinct sampling indices.
//! A status request is opened under one randomly drawn index; only oracles
//! holding that index may answer it. Responses are grouped by reported status,
//! and the first group to reach the quorum resolves the request, exactly once.
//! Resolution is handed to a [`Settlement`] implementation, which pays out on
//! airline-caused delays.

pub mod aggregator;
pub mod error;
pub mod registry;
pub mod settlement;

pub use aggregator::{Resolution, ResponseAggregator, ResponseOutcome};
pub use error::OracleError;
pub use registry::OracleRegistry;
pub use settlement::{Credit, Settlement, SettlementError};
