//! HTTP Request/Response Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use time_tracker_core::application::{ListUsersRequest, UpdateUserRequest, UserPage};
use time_tracker_core::domain::{Task, TaskId, User, UserId};
use utoipa::{IntoParams, ToSchema};

/// Successful response: `{"data": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self { data }
    }
}

/// Failed response: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// POST /users
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserBody {
    /// "<series> <number>"; a missing field is validated like an empty one
    #[serde(rename = "passportNumber", default)]
    #[schema(example = "1234 567890")]
    pub passport_number: String,
}

/// PUT /users/{id}
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    #[serde(rename = "passportNumber")]
    pub passport_number: Option<String>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        UpdateUserRequest {
            name: body.name,
            surname: body.surname,
            patronymic: body.patronymic,
            passport_number: body.passport_number,
        }
    }
}

/// GET /users query string
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page, values below 1 read as 1
    pub page: Option<i64>,
    /// Page size, default 10, capped at 100
    pub limit: Option<i64>,
    /// Case-insensitive substring of "name surname patronymic"
    pub name: Option<String>,
}

impl From<ListUsersQuery> for ListUsersRequest {
    fn from(query: ListUsersQuery) -> Self {
        ListUsersRequest {
            page: query.page,
            limit: query.limit,
            name: query.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub passport_serie: i64,
    pub passport_number: i64,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            patronymic: user.patronymic,
            passport_serie: user.passport.series,
            passport_number: user.passport.number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub count: i64,
    pub pages: i64,
    pub page: i64,
}

impl From<UserPage> for UserListDto {
    fn from(page: UserPage) -> Self {
        Self {
            users: page.users.into_iter().map(UserDto::from).collect(),
            count: page.count,
            pages: page.pages,
            page: page.page,
        }
    }
}

/// Task as listed; `until` is `null` while the task runs
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskDto {
    pub id: TaskId,
    pub since: DateTime<Utc>,
    pub until: Option<DateTime<Utc>>,
    pub minutes: i64,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            since: task.since,
            until: task.until,
            minutes: task.minutes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartTaskResponse {
    pub task_id: TaskId,
}
