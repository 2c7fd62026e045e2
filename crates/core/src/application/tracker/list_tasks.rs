// List Tasks Use Case

use crate::domain::{Task, UserId};
use crate::error::{Result, StoreResultExt};
use crate::port::TaskRepository;

/// Execute list-tasks use case
///
/// No existence check on the user: an unknown user simply has no tasks.
pub async fn execute(task_repo: &dyn TaskRepository, user_id: UserId) -> Result<Vec<Task>> {
    let mut tasks = task_repo
        .list_by_user(user_id)
        .await
        .context("list tasks")?;

    tasks.sort_by_key(|t| t.id);
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tracker::test_support::nine_am;
    use crate::error::ErrorKind;
    use crate::port::task_repository::MockTaskRepository;
    use crate::port::StoreError;
    use chrono::Duration;

    fn finished(id: i64) -> Task {
        Task {
            id,
            user_id: 51,
            since: nine_am(),
            until: Some(nine_am() + Duration::hours(1)),
            minutes: 60,
        }
    }

    #[tokio::test]
    async fn test_list_tasks_sorted_by_id() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list_by_user()
            .withf(|u| *u == 51)
            .returning(|_| Ok(vec![finished(82), finished(81)]));

        let tasks = execute(&repo, 51).await.unwrap();
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![81, 82]);
    }

    #[tokio::test]
    async fn test_list_tasks_unknown_user_is_empty() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list_by_user().returning(|_| Ok(Vec::new()));

        assert!(execute(&repo, 12345).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_tasks_failure() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list_by_user()
            .returning(|_| Err(StoreError::Database("test error".into())));

        let err = execute(&repo, 1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(err.to_string(), "list tasks: test error");
    }
}
