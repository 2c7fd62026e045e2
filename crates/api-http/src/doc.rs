//! OpenAPI Document
//!
//! Served as JSON at `/openapi.json` and browsable through Swagger UI at
//! `/swagger`.

use crate::handler;
use crate::types::{
    CreateUserBody, ErrorEnvelope, StartTaskResponse, TaskDto, UpdateUserBody, UserDto,
    UserListDto,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Time Tracker API",
        description = "Users registered by passport and the timed tasks they run."
    ),
    paths(
        handler::health,
        handler::create_user,
        handler::list_users,
        handler::get_user,
        handler::update_user,
        handler::delete_user,
        handler::list_tasks,
        handler::start_task,
        handler::end_task,
    ),
    components(schemas(
        CreateUserBody,
        UpdateUserBody,
        UserDto,
        UserListDto,
        TaskDto,
        StartTaskResponse,
        ErrorEnvelope
    )),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "tasks", description = "Starting, ending and listing tasks"),
        (name = "health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    fn assert_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected object schema"),
        }
    }

    #[test]
    fn test_every_route_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/users",
            "/users/{id}",
            "/users/{id}/tasks",
            "/users/{id}/tasks/start",
            "/users/{id}/tasks/{task_id}/end",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_schemas_use_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;

        let user = schemas.get("UserDto").unwrap();
        assert_has_field(user, "passportSerie");
        assert_has_field(user, "passportNumber");

        assert_has_field(schemas.get("CreateUserBody").unwrap(), "passportNumber");
        assert_has_field(schemas.get("TaskDto").unwrap(), "until");
        assert_has_field(schemas.get("ErrorEnvelope").unwrap(), "error");
    }
}
