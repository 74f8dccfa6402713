use thiserror::Error;

#[derive(Debug, Error)]
pub enum RandomError {
    #[error("entropy source unavailable: {0}")]
    Unavailable(String),

    #[error("cannot draw {wanted} distinct indices from a domain of {domain}")]
    DomainTooSmall { wanted: u8, domain: u8 },

    #[error("gave up after {0} draws without enough distinct indices")]
    Exhausted(u32),
}
