// src/github/mod.rs
// =============================================================================
// This module handles fetching data from GitHub repositories.
//
// Currently implements:
// - A small client for the REST contents API (README, listings, raw files)
// - Pass-through of the caller's bearer token
// - Parsing GitHub URLs to extract owner/repo
// =============================================================================

mod error;
mod fetch;

pub use error::GitHubError;
pub use fetch::{build_http_client, parse_github_url, token_from_header, GitHubClient, DEFAULT_API_URL};
