// src/catalog.rs
// =============================================================================
// This file glues the GitHub client to the language parsing logic.
//
// Both the HTTP server and the CLI answer the same two questions:
// - "Which languages are in the collection?"  -> fetch_languages
// - "Show me the example for language X"      -> fetch_language
//
// The network calls live here; the parsing stays pure in `languages`.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::github::{GitHubClient, GitHubError};
use crate::languages::{bucket_key, extract_languages, find_language, Language};

// The example file of one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    /// Path of the file inside the repository (e.g. "g/Go.go")
    pub path: String,
    /// Raw file content
    pub content: String,
}

// A language together with its example file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCode {
    pub language: Language,
    pub code: Code,
}

// Lists every language in the repository's README
pub async fn fetch_languages(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
) -> Result<Vec<Language>, GitHubError> {
    let readme = client.fetch_readme(owner, repo).await?;
    let languages = extract_languages(&readme);

    info!(owner, repo, count = languages.len(), "Extracted languages from README");
    Ok(languages)
}

// Finds one language and fetches its example file
//
// Steps:
// 1. Pick the bucket directory from the first character of `name`
// 2. List that directory and match the name, ignoring case
// 3. Download the matched file
//
// Returns: Ok(None) when the bucket has no such language
//
// `name` must not be empty (callers reject empty names up front).
pub async fn fetch_language(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    name: &str,
) -> Result<Option<LanguageCode>, GitHubError> {
    let bucket = bucket_key(name).to_string();
    let entries = client.list_directory(owner, repo, &bucket).await?;

    let Some(language) = find_language(&entries, name) else {
        debug!(name, bucket, "Language not found in bucket");
        return Ok(None);
    };

    let path = format!("{}/{}", bucket, language.file_name());
    let content = client.fetch_file_content(owner, repo, &path).await?;

    info!(name, path, bytes = content.len(), "Fetched language example");
    Ok(Some(LanguageCode {
        language,
        code: Code { path, content },
    }))
}
