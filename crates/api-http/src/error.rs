//! HTTP Error Types
//!
//! Maps application errors to HTTP status codes and the error envelope.

use crate::types::ErrorEnvelope;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use time_tracker_core::{AppError, ErrorKind};

/// Error returned by every handler
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed path parameter, query string or body
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    App(#[from] AppError),
}

/// Message of a failed response, picked up by the request logger
#[derive(Debug, Clone)]
pub(crate) struct FailureMessage(pub String);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::App(e) => status_for(e.kind()),
        }
    }
}

/// Status code for an application error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = ErrorEnvelope {
            error: message.clone(),
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(FailureMessage(message));
        response
    }
}
