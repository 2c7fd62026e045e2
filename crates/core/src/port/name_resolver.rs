// Name Resolver Port (optional enrichment on user creation)

use crate::domain::{Passport, PersonName};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameResolverError {
    #[error("name service request failed: {0}")]
    Transport(String),

    #[error("name service returned status {0}")]
    Status(u16),

    #[error("name service returned an invalid body: {0}")]
    InvalidBody(String),
}

/// Looks up a person's name by passport
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, passport: &Passport) -> Result<PersonName, NameResolverError>;
}
