// Central Error Type for the Application

use crate::domain::DomainError;
use crate::port::StoreError;
use thiserror::Error;

/// Coarse classification callers branch on (HTTP status mapping, retries)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data failed parsing or shape checks
    InvalidInput,
    /// A referenced user or task does not exist
    NotFound,
    /// The operation conflicts with the current state of the record
    InvalidState,
    /// Any other failure reported by the persistence gateway
    Persistence,
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidState(String),

    /// Gateway failure wrapped with the chain of operations that led to it,
    /// outermost first (e.g. "end task: update task").
    #[error("{}: {source}", .context.join(": "))]
    Persistence {
        context: Vec<&'static str>,
        #[source]
        source: StoreError,
    },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn persistence(context: &'static str, source: StoreError) -> Self {
        AppError::Persistence {
            context: vec![context],
            source,
        }
    }

    pub fn user_not_found(user_id: i64) -> Self {
        AppError::NotFound(format!("user {} not found", user_id))
    }

    pub fn task_not_found(user_id: i64, task_id: i64) -> Self {
        AppError::NotFound(format!("task {} of user {} not found", task_id, user_id))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::InvalidState(_) => ErrorKind::InvalidState,
            AppError::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    /// Prepend an outer operation to the context chain of a persistence
    /// error. Other kinds carry caller-facing messages and pass through.
    pub fn context(self, outer: &'static str) -> Self {
        match self {
            AppError::Persistence {
                mut context,
                source,
            } => {
                context.insert(0, outer);
                AppError::Persistence { context, source }
            }
            other => other,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidPassport(msg) => AppError::InvalidInput(msg),
            DomainError::InvalidPage(msg) => AppError::InvalidInput(msg),
            e @ DomainError::TaskAlreadyFinished { .. } => AppError::InvalidState(e.to_string()),
        }
    }
}

/// Attach operation context to results coming back from a repository port
pub trait StoreResultExt<T> {
    /// Wrap any store failure as `Persistence` under `context`
    fn context(self, context: &'static str) -> Result<T>;

    /// Like [`StoreResultExt::context`], but a store-level `NotFound`
    /// (zero rows affected) becomes the domain `NotFound` built by `missing`
    fn or_not_found<F>(self, context: &'static str, missing: F) -> Result<T>
    where
        F: FnOnce() -> AppError;
}

impl<T> StoreResultExt<T> for std::result::Result<T, StoreError> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| AppError::persistence(context, source))
    }

    fn or_not_found<F>(self, context: &'static str, missing: F) -> Result<T>
    where
        F: FnOnce() -> AppError,
    {
        match self {
            Ok(value) => Ok(value),
            Err(StoreError::NotFound) => Err(missing()),
            Err(source) => Err(AppError::persistence(context, source)),
        }
    }
}
