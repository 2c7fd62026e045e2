// User Repository Port (Interface)

use crate::domain::{NewUser, User, UserId};
use crate::port::store::StoreResult;
use async_trait::async_trait;

/// Listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of "name surname patronymic"
    pub name: Option<String>,
}

/// Repository interface for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, returning the assigned ID
    async fn insert(&self, user: &NewUser) -> StoreResult<UserId>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Overwrite all attributes of an existing user (`NotFound` if absent)
    async fn update(&self, user: &User) -> StoreResult<()>;

    /// Delete a user and its tasks (`NotFound` if absent)
    async fn delete(&self, id: UserId) -> StoreResult<()>;

    /// Count users matching the filter
    async fn count(&self, filter: &UserFilter) -> StoreResult<i64>;

    /// One page of users matching the filter, ordered by ID
    async fn list(&self, filter: &UserFilter, offset: i64, limit: i64) -> StoreResult<Vec<User>>;
}
