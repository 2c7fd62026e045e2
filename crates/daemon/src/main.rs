//! Time Tracker - Main Entry Point
//! HTTP API over SQLite, with optional name enrichment

mod settings;

use anyhow::{Context, Result};
use settings::{LogFormat, ServerConfig};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use time_tracker_api_http::{HttpServer, HttpServerConfig};
use time_tracker_core::application::TrackerService;
use time_tracker_core::port::time_provider::SystemTimeProvider;
use time_tracker_infra_nameservice::{HttpNameResolver, NameServiceConfig};
use time_tracker_infra_sqlite::{
    create_pool, run_migrations, SqliteTaskRepository, SqliteUserRepository,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_LOG_FILTER: &str = "time_tracker=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = ServerConfig::load().context("Failed to load configuration")?;

    // 2. Initialize logging
    init_logging(config.log_format())?;

    info!("Time Tracker v{} starting...", VERSION);

    // 3. Initialize database
    info!(dsn = %config.database_dsn, "Initializing database...");
    let pool = create_pool(&config.database_dsn, config.database_max_connections)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let task_repo = Arc::new(SqliteTaskRepository::new(pool.clone()));

    let mut service = TrackerService::new(user_repo, task_repo, time_provider);

    match config.name_service_url() {
        Some(url) => {
            let resolver = HttpNameResolver::new(NameServiceConfig {
                base_url: url.to_string(),
                timeout: config.name_service_timeout(),
            })
            .context("Name service client setup failed")?;
            info!(url = %url, "Name enrichment enabled");
            service = service.with_name_resolver(Arc::new(resolver));
        }
        None => info!("NAME_SERVICE_URL not set, users are created without names"),
    }

    // 5. Start HTTP server
    let server = HttpServer::new(
        HttpServerConfig {
            listen: config.listen.clone(),
        },
        service,
    );
    let handle = server
        .start()
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;

    info!(listen = %handle.local_addr(), "System ready");

    // 6. Wait for shutdown signal
    shutdown_signal().await;

    // 7. Graceful shutdown
    info!("Shutdown signal received. Stopping HTTP server...");
    handle.stop().await.context("HTTP server failed")?;
    pool.close().await;

    info!("Shutdown complete.");

    Ok(())
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
