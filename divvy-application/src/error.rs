use divvy_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to (de)serialize {key}: {detail}")]
    Serialization { key: &'static str, detail: String },
    #[error("Ledger store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Ledger store error: {0}")]
    Store(#[from] StoreError),
    #[error("Participant '{name}' is referenced by recorded expenses or settlements")]
    ParticipantInUse { name: String },
    #[error("No expense at position {index}")]
    ExpenseNotFound { index: usize },
}
