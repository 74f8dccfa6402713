//! FlightSurety: airline admission, oracle-verified flight status and
//! parametric delay insurance behind one transactional entry point.
//!
//! [`FlightSurety`] wraps the admission, oracle and insurance engines. Every
//! mutating call is checked against the operational flag first, then against
//! the caller's authorization, and then runs as one store transaction under a
//! single writer. Events are delivered to [`EventBus`] subscribers only after
//! the transaction commits.

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod surety;

pub use auth::{Authorizer, CallerRegistry};
pub use config::SuretyConfig;
pub use error::{ErrorKind, SuretyError};
pub use events::{EventBus, SuretyEvent};
pub use logging::{init_logging, LogFormat};
pub use surety::{Collaborators, FlightSurety};
