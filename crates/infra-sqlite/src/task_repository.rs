// SQLite TaskRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use time_tracker_core::domain::{NewTask, Task, TaskId, UserId};
use time_tracker_core::port::{StoreResult, TaskRepository};

pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, task: &NewTask) -> StoreResult<TaskId> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (user_id, start_time, end_time, minutes)
            VALUES (?, ?, NULL, 0)
            "#,
        )
        .bind(task.user_id)
        .bind(task.since)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn find_for_user(&self, user_id: UserId, task_id: TaskId) -> StoreResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, user_id, start_time, end_time, minutes
            FROM tasks
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(TaskRow::into_task))
    }

    async fn finish(
        &self,
        user_id: UserId,
        task_id: TaskId,
        until: DateTime<Utc>,
        minutes: i64,
    ) -> StoreResult<bool> {
        // Conditional update: a task that is already finished is left alone
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET end_time = ?, minutes = ?
            WHERE id = ? AND user_id = ? AND end_time IS NULL
            "#,
        )
        .bind(until)
        .bind(minutes)
        .bind(task_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, start_time, end_time, minutes
            FROM tasks
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    user_id: i64,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    minutes: i64,
}

impl TaskRow {
    fn into_task(self) -> Task {
        Task {
            id: self.id,
            user_id: self.user_id,
            since: self.start_time,
            until: self.end_time,
            minutes: self.minutes,
        }
    }
}
