use thiserror::Error;

/// Flat error for the persistence layer. Callers generally only care whether
/// an operation failed; the message carries whatever the database reported.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Database(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Invalid(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
