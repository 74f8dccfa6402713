//! Randomness for oracle index assignment.
//!
//! Indices decide which oracles may answer a request, so whoever can predict or
//! steer them can pack a quorum. Seeds therefore come from the operating system
//! CSPRNG, never from ledger data, and every draw is bound to a purpose tag and
//! the identity it is drawn for.

pub mod error;
pub mod os;
pub mod sampler;

pub use error::RandomError;
pub use os::OsRandom;
pub use sampler::{IndexSampler, Purpose};

/// Source of 32-byte seeds.
pub trait RandomnessProvider: Send + Sync {
    /// Produce a fresh seed bound to `context`.
    fn seed(&self, context: &[u8]) -> Result<[u8; 32], RandomError>;

    /// Human-readable name of this provider.
    fn name(&self) -> &str;
}
