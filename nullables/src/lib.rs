//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the core (storage substrate, entropy,
//! currency transfer) sits behind a trait. This crate provides implementations
//! that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! `MemoryStore` doubles as the default backend when no substrate is wired in.

pub mod random;
pub mod store;
pub mod transfer;

pub use random::NullRandom;
pub use store::MemoryStore;
pub use transfer::NullTransfer;
