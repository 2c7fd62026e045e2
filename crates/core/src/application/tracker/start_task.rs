// Start Task Use Case

use crate::domain::{NewTask, TaskId, UserId};
use crate::error::{AppError, Result, StoreResultExt};
use crate::port::{TaskRepository, TimeProvider, UserRepository};

/// Execute start-task use case
pub async fn execute(
    user_repo: &dyn UserRepository,
    task_repo: &dyn TaskRepository,
    time_provider: &dyn TimeProvider,
    user_id: UserId,
) -> Result<TaskId> {
    let user = user_repo
        .find_by_id(user_id)
        .await
        .context("get user")?
        .ok_or_else(|| AppError::user_not_found(user_id))?;

    let task = NewTask::start(user.id, time_provider.now());

    task_repo.insert(&task).await.context("create task")
}
