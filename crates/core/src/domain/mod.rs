// Domain Layer - Pure business logic and entities

pub mod error;
pub mod pagination;
pub mod passport;
pub mod task;
pub mod user;

// Re-exports
pub use error::DomainError;
pub use pagination::{PageRequest, PageWindow};
pub use passport::Passport;
pub use task::{elapsed_minutes, NewTask, Task, TaskId};
pub use user::{NewUser, PersonName, User, UserId, UserPatch};
