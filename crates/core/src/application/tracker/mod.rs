// Tracker Service - Core use cases for users and their tasks

pub mod create_user;
pub mod end_task;
pub mod list_tasks;
pub mod start_task;
pub mod users;

pub use users::{ListUsersRequest, UpdateUserRequest, UserPage};

use crate::domain::{Task, TaskId, User, UserId};
use crate::error::Result;
use crate::port::{NameResolver, TaskRepository, TimeProvider, UserRepository};
use std::sync::Arc;
use tracing::instrument;

/// Tracker Service
///
/// Holds only shared handles to its collaborators; every call is independent.
#[derive(Clone)]
pub struct TrackerService {
    user_repo: Arc<dyn UserRepository>,
    task_repo: Arc<dyn TaskRepository>,
    time_provider: Arc<dyn TimeProvider>,
    name_resolver: Option<Arc<dyn NameResolver>>,
}

impl TrackerService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        task_repo: Arc<dyn TaskRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            user_repo,
            task_repo,
            time_provider,
            name_resolver: None,
        }
    }

    /// Enable name enrichment on user creation
    pub fn with_name_resolver(mut self, resolver: Arc<dyn NameResolver>) -> Self {
        self.name_resolver = Some(resolver);
        self
    }

    /// Register a user from a "<series> <number>" passport string
    #[instrument(name = "tracker.create_user", skip(self, passport_number))]
    pub async fn create_user(&self, passport_number: &str) -> Result<UserId> {
        create_user::execute(
            self.user_repo.as_ref(),
            self.name_resolver.as_deref(),
            passport_number,
        )
        .await
    }

    /// Start a new task for an existing user
    #[instrument(name = "tracker.start_task", skip(self))]
    pub async fn start_task(&self, user_id: UserId) -> Result<TaskId> {
        start_task::execute(
            self.user_repo.as_ref(),
            self.task_repo.as_ref(),
            self.time_provider.as_ref(),
            user_id,
        )
        .await
        .map_err(|e| e.context("start task"))
    }

    /// Finish a running task owned by `user_id`
    #[instrument(name = "tracker.end_task", skip(self))]
    pub async fn end_task(&self, user_id: UserId, task_id: TaskId) -> Result<Task> {
        end_task::execute(
            self.user_repo.as_ref(),
            self.task_repo.as_ref(),
            self.time_provider.as_ref(),
            user_id,
            task_id,
        )
        .await
        .map_err(|e| e.context("end task"))
    }

    #[instrument(name = "tracker.list_tasks", skip(self))]
    pub async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>> {
        list_tasks::execute(self.task_repo.as_ref(), user_id).await
    }

    #[instrument(name = "tracker.get_user", skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> Result<User> {
        users::get(self.user_repo.as_ref(), user_id).await
    }

    #[instrument(name = "tracker.list_users", skip(self))]
    pub async fn list_users(&self, req: ListUsersRequest) -> Result<UserPage> {
        users::list(self.user_repo.as_ref(), req).await
    }

    #[instrument(name = "tracker.update_user", skip(self, req))]
    pub async fn update_user(&self, user_id: UserId, req: UpdateUserRequest) -> Result<User> {
        users::update(self.user_repo.as_ref(), user_id, req)
            .await
            .map_err(|e| e.context("update user"))
    }

    #[instrument(name = "tracker.delete_user", skip(self))]
    pub async fn delete_user(&self, user_id: UserId) -> Result<()> {
        users::delete(self.user_repo.as_ref(), user_id).await
    }
}
