use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The addressed row does not exist.
    #[error("entity not found")]
    NotFound,
    /// A unique, foreign key or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// A stored row could not be converted into a domain value.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// No connection could be obtained from the pool.
    #[error("connection error: {0}")]
    Connection(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => RepositoryError::ConstraintViolation(info.message().to_string()),
            other => RepositoryError::Unexpected(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::Connection(err.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}
