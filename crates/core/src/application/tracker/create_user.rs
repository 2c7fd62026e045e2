// Create User Use Case

use crate::domain::{NewUser, Passport, UserId};
use crate::error::{Result, StoreResultExt};
use crate::port::{NameResolver, UserRepository};
use tracing::debug;

/// Execute create-user use case
///
/// # Arguments
///
/// * `user_repo` - User repository
/// * `name_resolver` - Optional enrichment; `None` leaves the name fields empty
/// * `passport_number` - Raw "<series> <number>" string from the caller
pub async fn execute(
    user_repo: &dyn UserRepository,
    name_resolver: Option<&dyn NameResolver>,
    passport_number: &str,
) -> Result<UserId> {
    // Validation happens before anything touches the store
    let passport = Passport::parse(passport_number)?;
    let mut new_user = NewUser::from_passport(passport);

    if let Some(resolver) = name_resolver {
        match resolver.resolve(&passport).await {
            Ok(person) => new_user = new_user.with_name(person),
            Err(e) => debug!(error = %e, "Name resolution failed, creating user without name"),
        }
    }

    user_repo.insert(&new_user).await.context("create user")
}
