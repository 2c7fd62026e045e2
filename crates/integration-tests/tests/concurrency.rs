//! Concurrent requests against a shared file-backed pool

use chrono::Duration;
use std::sync::Arc;
use time_tracker_core::ErrorKind;
use time_tracker_integration_tests::{
    migrated_pool, october_first, service_with_clock, ManualClock, TempDb,
};

/// Two EndTask calls racing on one task: exactly one wins
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_end_task_single_winner() {
    let db = TempDb::new("concurrent-end");
    let pool = migrated_pool(&db.dsn(), 4).await;
    let clock = Arc::new(ManualClock::new(october_first()));
    let service = service_with_clock(&pool, clock.clone());

    let user_id = service.create_user("1 2").await.unwrap();

    for _ in 0..10 {
        let task_id = service.start_task(user_id).await.unwrap();
        clock.advance(Duration::minutes(1));

        let a = tokio::spawn({
            let service = service.clone();
            async move { service.end_task(user_id, task_id).await }
        });
        let b = tokio::spawn({
            let service = service.clone();
            async move { service.end_task(user_id, task_id).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1, "{:?}", results);

        let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert_eq!(loser.kind(), ErrorKind::InvalidState);
    }

    let tasks = service.list_tasks(user_id).await.unwrap();
    assert_eq!(tasks.len(), 10);
    assert!(tasks.iter().all(|t| t.until.is_some() && t.minutes == 1));
    pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_start_task_distinct_ids() {
    let db = TempDb::new("concurrent-start");
    let pool = migrated_pool(&db.dsn(), 4).await;
    let service = service_with_clock(&pool, Arc::new(ManualClock::new(october_first())));
    let user_id = service.create_user("1 2").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let service = service.clone();
        handles.push(tokio::spawn(async move { service.start_task(user_id).await }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    assert_eq!(service.list_tasks(user_id).await.unwrap().len(), 20);
    pool.close().await;
}
