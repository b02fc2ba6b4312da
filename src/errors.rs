use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the ledger core.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("budget not found: {0}")]
    BudgetNotFound(Uuid),
    #[error("{entity} {id} is still referenced by {count} transaction(s)")]
    ReferencedByTransactions {
        entity: &'static str,
        id: Uuid,
        count: usize,
    },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
