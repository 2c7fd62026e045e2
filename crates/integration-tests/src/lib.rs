//! Shared fixtures for the end-to-end tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use time_tracker_core::application::TrackerService;
use time_tracker_core::port::TimeProvider;
use time_tracker_infra_sqlite::{
    create_pool, run_migrations, SqliteTaskRepository, SqliteUserRepository,
};

/// Clock the test moves by hand
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl TimeProvider for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn october_first() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 10, 1, 0, 0, 0).unwrap()
}

/// Migrated pool on `dsn`
pub async fn migrated_pool(dsn: &str, max_connections: u32) -> SqlitePool {
    let pool = create_pool(dsn, max_connections).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub fn service_with_clock(pool: &SqlitePool, clock: Arc<dyn TimeProvider>) -> TrackerService {
    TrackerService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteTaskRepository::new(pool.clone())),
        clock,
    )
}

/// Fresh database file under the system temp dir, removed on drop
pub struct TempDb {
    path: PathBuf,
}

impl TempDb {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "time-tracker-{}-{}.db",
            name,
            std::process::id()
        ));
        let db = Self { path };
        db.cleanup();
        db
    }

    pub fn dsn(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }

    fn cleanup(&self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        self.cleanup();
    }
}
