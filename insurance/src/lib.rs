//! Parametric flight insurance.
//!
//! Passengers buy at most one policy per flight, within the configured premium
//! range; premiums join the pooled funds. When oracles resolve a flight as late
//! through the airline's fault, every policyholder is credited the payout
//! multiple of their insured amount, exactly once per (flight, passenger).
//! Credit is withdrawn in full, bounded by the pooled funds.

pub mod error;
pub mod ledger;
pub mod payout;
pub mod pool;
pub mod settlement;

pub use error::InsuranceError;
pub use ledger::InsuranceLedger;
pub use payout::PayoutEngine;
pub use pool::PooledFunds;
pub use settlement::InsuranceSettlement;
