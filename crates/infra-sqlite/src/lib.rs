// Time Tracker Infrastructure - SQLite Adapter
// Implements: UserRepository, TaskRepository

mod connection;
mod error;
mod migration;
mod task_repository;
mod user_repository;

pub use connection::create_pool;
pub use migration::{current_version, run_migrations};
pub use task_repository::SqliteTaskRepository;
pub use user_repository::SqliteUserRepository;

// Note: sqlx::Error conversion is handled by map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for StoreError here)
