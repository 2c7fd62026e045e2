// Application Layer - Use Cases and Business Logic

pub mod tracker;

// Re-exports
pub use tracker::{ListUsersRequest, TrackerService, UpdateUserRequest, UserPage};
