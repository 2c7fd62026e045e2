// HTTP Name Resolver
//
// GET {base_url}/info?passportSerie=S&passportNumber=N
//   -> {"surname": "...", "name": "...", "patronymic": "...", ...}

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use time_tracker_core::domain::{Passport, PersonName};
use time_tracker_core::port::{NameResolver, NameResolverError};
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Name service client configuration
#[derive(Debug, Clone)]
pub struct NameServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl NameServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Response body; unknown fields (address, ...) are ignored
#[derive(Debug, Deserialize)]
struct InfoResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    patronymic: String,
}

pub struct HttpNameResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNameResolver {
    pub fn new(config: NameServiceConfig) -> Result<Self, NameResolverError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NameResolverError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, passport: &Passport) -> Result<PersonName, NameResolverError> {
        let url = format!("{}/info", self.base_url);
        debug!(url = %url, "Resolving name");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("passportSerie", passport.series.to_string()),
                ("passportNumber", passport.number.to_string()),
            ])
            .send()
            .await
            // Request URLs carry the passport in the query string
            .map_err(|e| NameResolverError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NameResolverError::Status(status.as_u16()));
        }

        let info: InfoResponse = response
            .json()
            .await
            .map_err(|e| NameResolverError::InvalidBody(e.without_url().to_string()))?;

        Ok(PersonName {
            name: info.name,
            surname: info.surname,
            patronymic: info.patronymic,
        })
    }
}

#[async_trait]
impl NameResolver for HttpNameResolver {
    async fn resolve(&self, passport: &Passport) -> Result<PersonName, NameResolverError> {
        self.fetch(passport).await.inspect_err(|e| {
            warn!(error = %e, base_url = %self.base_url, "Name service lookup failed");
        })
    }
}
