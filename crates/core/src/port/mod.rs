// Port Layer - Interfaces for external dependencies

pub mod name_resolver;
pub mod store;
pub mod task_repository;
pub mod time_provider; // For deterministic testing
pub mod user_repository;

// Re-exports
pub use name_resolver::{NameResolver, NameResolverError};
pub use store::{StoreError, StoreResult};
pub use task_repository::TaskRepository;
pub use time_provider::TimeProvider;
pub use user_repository::{UserFilter, UserRepository};
