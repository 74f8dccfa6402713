use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("no write transaction is open")]
    NoTransaction,

    #[error("a write transaction is already open")]
    TransactionOpen,
}
