// Task Domain Model

use super::error::{DomainError, Result};
use super::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task ID (assigned by the store)
pub type TaskId = i64;

/// Task Entity: a timed work session owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub since: DateTime<Utc>,
    /// Unset until the task is finished
    pub until: Option<DateTime<Utc>>,
    /// Whole minutes between `since` and `until`; 0 while running
    pub minutes: i64,
}

/// Task that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub user_id: UserId,
    pub since: DateTime<Utc>,
}

impl NewTask {
    /// Start a task with an explicit timestamp (injected, not system time)
    pub fn start(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            since: now,
        }
    }
}

impl Task {
    pub fn is_finished(&self) -> bool {
        self.until.is_some()
    }

    /// Finish the task at `now`, recomputing `minutes`
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.is_finished() {
            return Err(DomainError::TaskAlreadyFinished { task_id: self.id });
        }
        self.until = Some(now);
        self.minutes = elapsed_minutes(self.since, now);
        Ok(())
    }
}

/// Whole minutes between two instants, fractional minutes discarded.
///
/// A clock that went backwards yields 0 rather than a negative duration.
pub fn elapsed_minutes(since: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    (until - since).num_minutes().max(0)
}
