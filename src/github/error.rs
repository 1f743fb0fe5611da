// src/github/error.rs
// =============================================================================
// Errors coming back from the GitHub API.
//
// The server needs to know *why* a request failed so it can pick a status
// code, so this is a typed enum (thiserror) rather than an anyhow::Error.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    /// The configured API base URL can't have path segments appended
    #[error("invalid GitHub API URL: {0}")]
    InvalidUrl(String),

    /// GitHub answered, but not with a 2xx
    #[error("GitHub returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The request never got an answer (DNS, TLS, timeout, bad body, ...)
    #[error("request to GitHub failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl GitHubError {
    // The upstream HTTP status, if GitHub sent one
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
