use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Record not found: {0}")]
    NotFound(i64),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Failed to persist records: {0}")]
    Persistence(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
