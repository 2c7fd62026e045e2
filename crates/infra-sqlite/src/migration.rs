// Migration Runner

use crate::user_repository::search_key;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

/// Version that introduces `users.search_name`
const SEARCH_NAME_VERSION: i64 = 3;

/// Embedded migrations, applied in order: (version, description, sql)
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        1,
        "Initial schema",
        include_str!("../migrations/001_initial_schema.sql"),
    ),
    (
        2,
        "Task owner index",
        include_str!("../migrations/002_task_user_index.sql"),
    ),
    (
        SEARCH_NAME_VERSION,
        "User search name",
        include_str!("../migrations/003_user_search_name.sql"),
    ),
];

/// Run database migrations.
///
/// Versions already recorded in `schema_version` are skipped, so this is
/// safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    let current_version = current_version(pool).await?;
    info!("Current schema version: {}", current_version);

    for (version, description, sql) in MIGRATIONS {
        if current_version < *version {
            info!("Applying migration {:03}: {}", version, description);
            apply_migration(pool, *version, sql).await?;
        }
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// Highest applied version, 0 on a fresh database
pub async fn current_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    // Check if schema_version table exists
    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await?;

    if table_exists == 0 {
        return Ok(0);
    }

    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await?;

    Ok(version.unwrap_or(0))
}

/// Apply a single migration SQL file
async fn apply_migration(pool: &SqlitePool, version: i64, sql: &str) -> Result<(), sqlx::Error> {
    // Execute migration in a transaction
    let mut tx = pool.begin().await?;

    // Split by semicolon and execute each statement
    for statement in sql.split(';') {
        // Remove comments and trim
        let clean_statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if !clean_statement.is_empty() {
            sqlx::query(&clean_statement).execute(&mut *tx).await?;
        }
    }

    if version == SEARCH_NAME_VERSION {
        backfill_search_names(&mut tx).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Recompute `search_name` for every user with full Unicode case folding
async fn backfill_search_names(tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
    let rows: Vec<(i64, String, String, String)> =
        sqlx::query_as("SELECT id, name, surname, patronymic FROM users")
            .fetch_all(&mut **tx)
            .await?;

    for (id, name, surname, patronymic) in rows {
        sqlx::query("UPDATE users SET search_name = ? WHERE id = ?")
            .bind(search_key(&name, &surname, &patronymic))
            .bind(id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}
