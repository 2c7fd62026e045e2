//! HTTP Server
//!
//! Builds the axum router and runs it on a TCP listener until stopped.

use crate::doc::ApiDoc;
use crate::error::FailureMessage;
use crate::handler;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::io;
use std::net::SocketAddr;
use time_tracker_core::application::TrackerService;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// `host:port` to bind
    pub listen: String,
}

/// Build the API router around a tracker service, API docs included
pub fn router(service: TrackerService) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/users", post(handler::create_user).get(handler::list_users))
        .route(
            "/users/{id}",
            get(handler::get_user)
                .put(handler::update_user)
                .delete(handler::delete_user),
        )
        .route("/users/{id}/tasks", get(handler::list_tasks))
        .route("/users/{id}/tasks/start", post(handler::start_task))
        .route("/users/{id}/tasks/{task_id}/end", post(handler::end_task))
        .with_state(service)
        .merge(SwaggerUi::new("/swagger").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(log_failures))
        .layer(TraceLayer::new_for_http())
}

/// Log every failed request: 4xx at warn, 5xx at error
async fn log_failures(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    if let Some(FailureMessage(message)) = response.extensions().get::<FailureMessage>() {
        let status = response.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), path = %path, error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), path = %path, error = %message, "Request rejected");
        }
    }

    response
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    service: TrackerService,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, service: TrackerService) -> Self {
        Self { config, service }
    }

    /// Bind the listener and start serving in the background
    pub async fn start(self) -> io::Result<ServerHandle> {
        let listener = TcpListener::bind(&self.config.listen).await?;
        let local_addr = listener.local_addr()?;

        info!(listen = %local_addr, "Starting HTTP server");

        let app = router(self.service);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    // A dropped sender also stops the server
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(ServerHandle {
            local_addr,
            shutdown_tx,
            task,
        })
    }
}

/// Handle to a running server
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<io::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish
    pub async fn stop(self) -> io::Result<()> {
        let _ = self.shutdown_tx.send(());
        self.task.await.map_err(io::Error::other)??;
        info!("HTTP server stopped");
        Ok(())
    }
}
