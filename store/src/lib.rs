//! Abstract storage traits for FlightSurety.
//!
//! Each engine owns a set of tables and reaches them only through the trait
//! for those tables. Backends (the hosting ledger substrate, or the in-memory
//! store in `flightsure-nullables`) implement the traits plus [`Transactional`].

pub mod airline;
pub mod credit;
pub mod error;
pub mod oracle;
pub mod policy;
pub mod request;

pub use airline::{AirlineRecord, AirlineStore, VoteTally};
pub use credit::CreditStore;
pub use error::StoreError;
pub use oracle::{OracleRecord, OracleStore};
pub use policy::{FlightRecord, InsurancePolicy, PolicyStore};
pub use request::{RequestKey, StatusRequest, RequestStore};

/// Atomic write scope over every table of a backend.
///
/// Between `begin` and `commit` writes are provisional; `rollback` discards all
/// of them. Callers serialize write scopes; backends need not support nesting.
pub trait Transactional {
    fn begin(&self) -> Result<(), StoreError>;
    fn commit(&self) -> Result<(), StoreError>;
    fn rollback(&self) -> Result<(), StoreError>;
}

/// Every table the system needs, behind one backend.
pub trait Store:
    AirlineStore + OracleStore + RequestStore + PolicyStore + CreditStore + Transactional + Send + Sync
{
}

impl<T> Store for T where
    T: AirlineStore
        + OracleStore
        + RequestStore
        + PolicyStore
        + CreditStore
        + Transactional
        + Send
        + Sync
{
}
