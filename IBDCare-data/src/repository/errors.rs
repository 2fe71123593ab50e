use std::sync::PoisonError;
use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Not found error
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Date parsing error
    #[error("Date parsing error: {0}")]
    DateParse(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}

impl From<String> for RepositoryError {
    fn from(error: String) -> Self {
        // Determine if it's a validation error based on the error message
        if error.contains("validation") || error.contains("invalid") {
            RepositoryError::Validation(error)
        } else {
            RepositoryError::Storage(error)
        }
    }
}
