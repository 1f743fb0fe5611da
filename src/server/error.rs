// src/server/error.rs
// =============================================================================
// Errors a request handler can return, and how they become HTTP responses.
//
// Every error body has the same shape as the home route:
//   {"message": "..."}
// =============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

use super::routes::Message;
use crate::github::GitHubError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] GitHubError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(error) => upstream_status(error),
        }
    }
}

// Maps a GitHub failure onto our own status code
//
// 4xx/5xx from GitHub are passed through (a 404 stays a 404, a rate-limit
// 403 stays a 403). Anything else means GitHub gave us nothing usable.
fn upstream_status(error: &GitHubError) -> StatusCode {
    match error {
        GitHubError::Status { status, .. } => StatusCode::from_u16(*status)
            .ok()
            .filter(|code| code.is_client_error() || code.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        GitHubError::Request(_) => StatusCode::BAD_GATEWAY,
        GitHubError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "Request failed");

        let body = Message {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
