//! Airline admission.
//!
//! Airlines join by proposal from an existing Participant. While fewer than
//! `bootstrap_airline_count` airlines are registered a single proposal admits
//! directly; after that the proposal waits in Pending until
//! `ceil(50% × registered)` distinct Participants vote for it. A Registered
//! airline becomes a Participant once it funds at least the funding threshold.

pub mod controller;
pub mod error;
pub mod registry;
pub mod tally;

pub use controller::{AdmissionController, FundingOutcome, ProposalOutcome, VoteOutcome};
pub use error::AdmissionError;
pub use registry::AirlineRegistry;
pub use tally::VotingTally;
