use thiserror::Error;

/// Errors a patient store can signal.
///
/// `NotFound` is the only kind the HTTP layer ever names; the rest belong to
/// store implementations and pass through the handlers untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Patient/{0} not found")]
    NotFound(String),

    #[error("Invalid patient: {0}")]
    Invalid(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
