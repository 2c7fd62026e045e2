// Persistence gateway error

use thiserror::Error;

/// Failure reported by a repository adapter.
///
/// `NotFound` is only used by mutations that matched no row; lookups
/// return `Ok(None)` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no rows affected")]
    NotFound,

    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    #[error("{0}")]
    Database(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
