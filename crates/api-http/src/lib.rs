//! HTTP API Layer
//!
//! JSON over HTTP for the Time Tracker service. Every response body uses the
//! `{"data": ...}` / `{"error": "..."}` envelope. The OpenAPI document is
//! served at `/openapi.json` with Swagger UI at `/swagger`.

pub mod doc;
pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use doc::ApiDoc;
pub use error::ApiError;
pub use server::{router, HttpServer, HttpServerConfig, ServerHandle};
