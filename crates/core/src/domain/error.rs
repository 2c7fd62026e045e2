// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    InvalidPassport(String),

    #[error("invalid page request: {0}")]
    InvalidPage(String),

    #[error("task {task_id} is already finished")]
    TaskAlreadyFinished { task_id: i64 },
}

pub type Result<T> = std::result::Result<T, DomainError>;
