//! HTTP Handlers
//!
//! Thin adapters: coerce path parameters, call the tracker service, wrap the
//! result in the response envelope.

use crate::error::ApiError;
use crate::types::{
    CreateUserBody, Envelope, ErrorEnvelope, ListUsersQuery, StartTaskResponse, TaskDto,
    UpdateUserBody, UserDto, UserListDto,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use time_tracker_core::application::TrackerService;

type ApiResult<T> = Result<T, ApiError>;

fn parse_id(raw: &str, what: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("invalid {}: {}", what, raw)))
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain")),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "OK"
}

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Malformed passport number", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<TrackerService>,
    body: Result<Json<CreateUserBody>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(body) = body?;
    service.create_user(&body.passport_number).await?;
    Ok(StatusCode::CREATED)
}

/// GET /users?page=&limit=&name=
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = Envelope<UserListDto>),
        (status = 400, description = "Invalid page size or query", body = ErrorEnvelope)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<TrackerService>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<UserListDto>>> {
    let Query(query) = query?;
    let page = service.list_users(query.into()).await?;
    Ok(Json(Envelope::data(page.into())))
}

/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = Envelope<UserDto>),
        (status = 400, description = "Malformed user ID", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<TrackerService>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Envelope<UserDto>>> {
    let user_id = parse_id(&user_id, "user id")?;
    let user = service.get_user(user_id).await?;
    Ok(Json(Envelope::data(user.into())))
}

/// PUT /users/{id}
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "The updated user", body = Envelope<UserDto>),
        (status = 400, description = "Malformed user ID or passport number", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<TrackerService>,
    Path(user_id): Path<String>,
    body: Result<Json<UpdateUserBody>, JsonRejection>,
) -> ApiResult<Json<Envelope<UserDto>>> {
    let user_id = parse_id(&user_id, "user id")?;
    let Json(body) = body?;
    let user = service.update_user(user_id, body.into()).await?;
    Ok(Json(Envelope::data(user.into())))
}

/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User and their tasks deleted"),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<TrackerService>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    let user_id = parse_id(&user_id, "user id")?;
    service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/{id}/tasks
#[utoipa::path(
    get,
    path = "/users/{id}/tasks",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Tasks in ID order, empty for an unknown user", body = Envelope<Vec<TaskDto>>),
        (status = 400, description = "Malformed user ID", body = ErrorEnvelope)
    ),
    tag = "tasks"
)]
pub async fn list_tasks(
    State(service): State<TrackerService>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Envelope<Vec<TaskDto>>>> {
    let user_id = parse_id(&user_id, "user id")?;
    let tasks = service.list_tasks(user_id).await?;
    Ok(Json(Envelope::data(
        tasks.into_iter().map(TaskDto::from).collect(),
    )))
}

/// POST /users/{id}/tasks/start
#[utoipa::path(
    post,
    path = "/users/{id}/tasks/start",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Task started", body = Envelope<StartTaskResponse>),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tag = "tasks"
)]
pub async fn start_task(
    State(service): State<TrackerService>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Envelope<StartTaskResponse>>> {
    let user_id = parse_id(&user_id, "user id")?;
    let task_id = service.start_task(user_id).await?;
    Ok(Json(Envelope::data(StartTaskResponse { task_id })))
}

/// POST /users/{id}/tasks/{task_id}/end
#[utoipa::path(
    post,
    path = "/users/{id}/tasks/{task_id}/end",
    params(
        ("id" = i64, Path, description = "User ID"),
        ("task_id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task ended"),
        (status = 404, description = "No such task for this user", body = ErrorEnvelope),
        (status = 409, description = "Task already ended", body = ErrorEnvelope)
    ),
    tag = "tasks"
)]
pub async fn end_task(
    State(service): State<TrackerService>,
    Path((user_id, task_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let user_id = parse_id(&user_id, "user id")?;
    let task_id = parse_id(&task_id, "task id")?;
    service.end_task(user_id, task_id).await?;
    Ok(StatusCode::OK)
}
