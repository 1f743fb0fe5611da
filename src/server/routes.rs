// src/server/routes.rs
// =============================================================================
// The HTTP handlers and the JSON shapes they return.
//
// Routes:
//   GET /api                      -> welcome message
//   GET /api/languages            -> every language in the README
//   GET /api/language/{language}  -> one language plus its example file
//
// Each handler builds a GitHub client carrying the caller's token, checks
// the response cache, and falls back to the catalog functions.
// =============================================================================

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Uri};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use super::error::ApiError;
use super::AppState;
use crate::catalog::{self, Code, LanguageCode};
use crate::github::token_from_header;
use crate::languages::Language;

pub const WELCOME: &str = "Welcome to the Hello World API!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<Language>,
    pub requested_at: DateTime<Utc>,
    /// When the language list was stored in the cache (cache enabled only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub code: Code,
    pub language: Language,
    pub requested_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

pub async fn home() -> Json<Message> {
    Json(Message {
        message: WELCOME.to_string(),
    })
}

#[instrument(skip_all)]
pub async fn get_languages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<LanguagesResponse>, ApiError> {
    let requested_at = Utc::now();
    let repository = &state.config.repository;
    let key = format!("languages:{}/{}", repository.user, repository.name);

    if let Some((languages, cached_at)) = state.cached::<Vec<Language>>(&key) {
        return Ok(Json(LanguagesResponse {
            languages,
            requested_at,
            cached_at: Some(cached_at),
        }));
    }

    let client = state.github(caller_token(&headers))?;
    let languages = catalog::fetch_languages(&client, &repository.user, &repository.name).await?;
    let cached_at = state.store(&key, &languages);

    Ok(Json(LanguagesResponse {
        languages,
        requested_at,
        cached_at,
    }))
}

#[instrument(skip(state, headers))]
pub async fn get_language(
    State(state): State<Arc<AppState>>,
    Path(language): Path<String>,
    headers: HeaderMap,
) -> Result<Json<LanguageResponse>, ApiError> {
    let requested_at = Utc::now();

    let language = language.trim();
    if language.is_empty() {
        return Err(ApiError::BadRequest("Language name must not be empty".to_string()));
    }

    let repository = &state.config.repository;
    let key = format!(
        "language:{}/{}:{}",
        repository.user,
        repository.name,
        language.to_lowercase()
    );

    let (found, cached_at) = match state.cached::<LanguageCode>(&key) {
        Some((found, cached_at)) => (found, Some(cached_at)),
        None => {
            let client = state.github(caller_token(&headers))?;
            let found = catalog::fetch_language(&client, &repository.user, &repository.name, language)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Language '{}' not found", language)))?;
            let cached_at = state.store(&key, &found);
            (found, cached_at)
        }
    };

    Ok(Json(LanguageResponse {
        code: found.code,
        language: found.language,
        requested_at,
        cached_at,
    }))
}

// Fallback for every unknown route
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

fn caller_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(token_from_header)
}
