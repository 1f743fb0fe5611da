// src/server/mod.rs
// =============================================================================
// This module runs the HTTP API.
//
// Submodules:
// - routes: The handlers and their JSON response types
// - error: ApiError and its mapping to status codes
//
// Shared state (config, HTTP client, cache) lives in AppState and is handed
// to every handler through axum's State extractor. Nothing is global.
// =============================================================================

mod error;
mod routes;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::github::{build_http_client, GitHubClient, GitHubError};

// Everything a handler needs, shared behind an Arc
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    http: reqwest::Client,
    cache: Option<ResponseCache>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = build_http_client(config.github.timeout()).context("Failed to create HTTP client")?;

        // Fail at startup rather than on the first request
        GitHubClient::new(http.clone(), &config.github.api_url)?;

        let cache = config
            .cache
            .enabled
            .then(|| ResponseCache::new(config.cache.ttl()));

        Ok(AppState { config, http, cache })
    }

    // A GitHub client for one request, carrying the caller's token
    pub fn github(&self, token: Option<String>) -> Result<GitHubClient, GitHubError> {
        Ok(GitHubClient::new(self.http.clone(), &self.config.github.api_url)?.with_token(token))
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    // Reads and deserializes a cached value
    //
    // A value that no longer deserializes is treated as a miss.
    pub fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<(T, DateTime<Utc>)> {
        let value = self.cache()?.get(key)?;

        match serde_json::from_slice(&value.bytes) {
            Ok(parsed) => {
                debug!(key, "Cache hit");
                Some((parsed, value.cached_at))
            }
            Err(e) => {
                warn!(key, error = %e, "Ignoring unreadable cache entry");
                None
            }
        }
    }

    // Serializes and stores a value; returns its cached_at when caching is on
    pub fn store<T: Serialize>(&self, key: &str, value: &T) -> Option<DateTime<Utc>> {
        let cache = self.cache()?;

        match serde_json::to_vec(value) {
            Ok(bytes) => Some(cache.set(key, bytes)),
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize value for cache");
                None
            }
        }
    }
}

// Builds the router with all API routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(routes::home))
        .route("/api/languages", get(routes::get_languages))
        .route("/api/language/{language}", get(routes::get_language))
        .fallback(routes::not_found)
        .with_state(state)
}

// Binds the configured address and serves until Ctrl+C
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let state = Arc::new(state);
    if state.cache().is_some() {
        tokio::spawn(purge_cache(state.clone()));
    }

    info!("Server listening on {}", addr);
    info!("Available endpoints:");
    info!("  GET /api - Welcome message");
    info!("  GET /api/languages - List languages");
    info!("  GET /api/language/{{language}} - Show one language's example");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

// Removes expired cache entries once per TTL
async fn purge_cache(state: Arc<AppState>) {
    let Some(cache) = state.cache() else {
        return;
    };

    let mut interval = tokio::time::interval(cache.ttl().max(std::time::Duration::from_secs(1)));
    loop {
        interval.tick().await;
        let removed = cache.purge_expired();
        if removed > 0 {
            debug!(removed, remaining = cache.len(), "Purged expired cache entries");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
