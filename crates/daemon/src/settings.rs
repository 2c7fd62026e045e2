//! Daemon settings
//!
//! Read from the process environment (plus an optional `.env` file):
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_DSN` | `sqlite://time-tracker.db` |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `LISTEN` | `0.0.0.0:8080` |
//! | `NAME_SERVICE_URL` | unset (no name enrichment) |
//! | `NAME_SERVICE_TIMEOUT_SECS` | `5` |
//! | `LOG_FORMAT` | `pretty` (`json` for production) |

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_DATABASE_DSN: &str = "sqlite://time-tracker.db";
const DEFAULT_MAX_CONNECTIONS: i64 = 10;
const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
const DEFAULT_NAME_SERVICE_TIMEOUT_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub database_dsn: String,
    pub database_max_connections: u32,
    pub listen: String,
    name_service_url: Option<String>,
    name_service_timeout_secs: u64,
    log_format: String,
}

impl ServerConfig {
    /// Load `.env` (if any), then the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment(Environment::default())
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let mut config: ServerConfig = Config::builder()
            .set_default("database_dsn", DEFAULT_DATABASE_DSN)?
            .set_default("database_max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("listen", DEFAULT_LISTEN)?
            .set_default(
                "name_service_timeout_secs",
                DEFAULT_NAME_SERVICE_TIMEOUT_SECS,
            )?
            .set_default("log_format", "pretty")?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.listen = normalize_listen(&config.listen);
        Ok(config)
    }

    /// Base URL of the name service; empty counts as unset
    pub fn name_service_url(&self) -> Option<&str> {
        self.name_service_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn name_service_timeout(&self) -> Duration {
        Duration::from_secs(self.name_service_timeout_secs)
    }

    pub fn log_format(&self) -> LogFormat {
        if self.log_format.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Accept a bare `:port` as "all interfaces"
fn normalize_listen(listen: &str) -> String {
    let listen = listen.trim();
    if listen.starts_with(':') {
        format!("0.0.0.0{}", listen)
    } else {
        listen.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_environment(Environment::default().source(Some(source)))
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[]).unwrap();

        assert_eq!(config.database_dsn, "sqlite://time-tracker.db");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.name_service_url(), None);
        assert_eq!(config.name_service_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_format(), LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load_from(&[
            ("DATABASE_DSN", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("LISTEN", "127.0.0.1:9000"),
            ("NAME_SERVICE_URL", "http://names.local"),
            ("NAME_SERVICE_TIMEOUT_SECS", "2"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.database_dsn, "sqlite::memory:");
        assert_eq!(config.database_max_connections, 3);
        assert_eq!(config.listen, "127.0.0.1:9000");
        assert_eq!(config.name_service_url(), Some("http://names.local"));
        assert_eq!(config.name_service_timeout(), Duration::from_secs(2));
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_port_only_listen() {
        let config = load_from(&[("LISTEN", ":8081")]).unwrap();
        assert_eq!(config.listen, "0.0.0.0:8081");
    }

    #[test]
    fn test_empty_name_service_url_disables_resolver() {
        let config = load_from(&[("NAME_SERVICE_URL", "  ")]).unwrap();
        assert_eq!(config.name_service_url(), None);
    }

    #[test]
    fn test_invalid_number_is_error() {
        assert!(load_from(&[("DATABASE_MAX_CONNECTIONS", "many")]).is_err());
    }
}
