//! Full stack over real sockets: HTTP server, SQLite, name service

use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use time_tracker_api_http::{HttpServer, HttpServerConfig, ServerHandle};
use time_tracker_core::application::TrackerService;
use time_tracker_core::port::time_provider::SystemTimeProvider;
use time_tracker_infra_nameservice::{HttpNameResolver, NameServiceConfig};
use time_tracker_integration_tests::{migrated_pool, service_with_clock};

async fn start(service: TrackerService) -> (ServerHandle, String) {
    let handle = HttpServer::new(
        HttpServerConfig {
            listen: "127.0.0.1:0".into(),
        },
        service,
    )
    .start()
    .await
    .unwrap();
    let base = format!("http://{}", handle.local_addr());
    (handle, base)
}

#[tokio::test]
async fn test_http_task_flow() {
    let pool = migrated_pool("sqlite::memory:", 1).await;
    let (handle, base) = start(service_with_clock(&pool, Arc::new(SystemTimeProvider))).await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(health.status(), 200);
    assert_eq!(health.text().await.unwrap(), "OK");

    let created = client
        .post(format!("{}/users", base))
        .json(&json!({"passportNumber": "1234 567890"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);

    let started: Value = client
        .post(format!("{}/users/1/tasks/start", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let task_id = started["data"]["task_id"].as_i64().unwrap();

    let ended = client
        .post(format!("{}/users/1/tasks/{}/end", base, task_id))
        .send()
        .await
        .unwrap();
    assert_eq!(ended.status(), 200);

    let again = client
        .post(format!("{}/users/1/tasks/{}/end", base, task_id))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 409);
    let body: Value = again.json().await.unwrap();
    assert!(body.get("data").is_none());
    assert!(body["error"].is_string());

    let tasks: Value = client
        .get(format!("{}/users/1/tasks", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let task = &tasks["data"][0];
    assert_eq!(task["id"], task_id);
    assert!(task["until"].is_string());
    assert_eq!(task["minutes"], 0);

    handle.stop().await.unwrap();
    pool.close().await;
}

#[tokio::test]
async fn test_names_filled_from_name_service() {
    let names = MockServer::start_async().await;
    let lookup = names
        .mock_async(|when, then| {
            when.method(GET)
                .path("/info")
                .query_param("passportSerie", "1234")
                .query_param("passportNumber", "567890");
            then.status(200).json_body(json!({
                "surname": "Ivanov",
                "name": "Ivan",
                "patronymic": "Ivanovich"
            }));
        })
        .await;

    let pool = migrated_pool("sqlite::memory:", 1).await;
    let resolver = HttpNameResolver::new(NameServiceConfig {
        base_url: names.base_url(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();
    let service = service_with_clock(&pool, Arc::new(SystemTimeProvider))
        .with_name_resolver(Arc::new(resolver));
    let (handle, base) = start(service).await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{}/users", base))
        .json(&json!({"passportNumber": "1234 567890"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    lookup.assert_async().await;

    let user: Value = client
        .get(format!("{}/users/1", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        user["data"],
        json!({
            "id": 1,
            "name": "Ivan",
            "surname": "Ivanov",
            "patronymic": "Ivanovich",
            "passportSerie": 1234,
            "passportNumber": 567890
        })
    );

    handle.stop().await.unwrap();
    pool.close().await;
}

#[tokio::test]
async fn test_name_service_outage_does_not_block_creation() {
    let names = MockServer::start_async().await;
    names
        .mock_async(|when, then| {
            when.method(GET).path("/info");
            then.status(503);
        })
        .await;

    let pool = migrated_pool("sqlite::memory:", 1).await;
    let resolver = HttpNameResolver::new(NameServiceConfig::new(names.base_url())).unwrap();
    let service = service_with_clock(&pool, Arc::new(SystemTimeProvider))
        .with_name_resolver(Arc::new(resolver));

    let user_id = service.create_user("1 2").await.unwrap();
    let user = service.get_user(user_id).await.unwrap();
    assert!(user.name.is_empty());

    pool.close().await;
}
