// End Task Use Case

use crate::domain::{Task, TaskId, UserId};
use crate::error::{AppError, Result, StoreResultExt};
use crate::port::{TaskRepository, TimeProvider, UserRepository};

/// Execute end-task use case
///
/// The final write is conditional on the task still running, so two
/// concurrent calls cannot both succeed: the loser gets `InvalidState`.
pub async fn execute(
    user_repo: &dyn UserRepository,
    task_repo: &dyn TaskRepository,
    time_provider: &dyn TimeProvider,
    user_id: UserId,
    task_id: TaskId,
) -> Result<Task> {
    let user = user_repo
        .find_by_id(user_id)
        .await
        .context("get user")?
        .ok_or_else(|| AppError::user_not_found(user_id))?;

    let mut task = task_repo
        .find_for_user(user.id, task_id)
        .await
        .context("get task")?
        .ok_or_else(|| AppError::task_not_found(user.id, task_id))?;

    let now = time_provider.now();
    task.finish(now)?;

    let updated = task_repo
        .finish(user.id, task.id, now, task.minutes)
        .await
        .context("update task")?;

    if !updated {
        return Err(AppError::InvalidState(format!(
            "task {} was finished concurrently",
            task.id
        )));
    }

    Ok(task)
}
