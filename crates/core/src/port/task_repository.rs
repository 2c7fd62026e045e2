// Task Repository Port (Interface)

use crate::domain::{NewTask, Task, TaskId, UserId};
use crate::port::store::StoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new (running) task, returning the assigned ID
    async fn insert(&self, task: &NewTask) -> StoreResult<TaskId>;

    /// Find a task by ID, scoped to its owner
    async fn find_for_user(&self, user_id: UserId, task_id: TaskId) -> StoreResult<Option<Task>>;

    /// Set end time and minutes only if the task is still running.
    ///
    /// Returns `false` when no running task matched (already finished,
    /// or not owned by `user_id`).
    async fn finish(
        &self,
        user_id: UserId,
        task_id: TaskId,
        until: DateTime<Utc>,
        minutes: i64,
    ) -> StoreResult<bool>;

    /// All tasks of a user, ordered by task ID
    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<Task>>;
}
