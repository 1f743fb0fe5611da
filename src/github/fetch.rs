// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// We need three read-only calls:
// - GET /repos/{owner}/{repo}/readme            -> README text
// - GET /repos/{owner}/{repo}/contents/{path}   -> directory listing
// - GET /repos/{owner}/{repo}/contents/{path}   -> raw file text
//
// The "raw" media type makes GitHub send the file itself instead of a JSON
// object with base64 content, so README and file fetches are plain text.
//
// Authentication is optional. Without a token GitHub still answers, just
// with a much lower rate limit.
// =============================================================================

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::GitHubError;
use crate::languages::DirectoryEntry;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Builds the shared HTTP client
//
// One client is created at startup and cloned everywhere (reqwest clients
// are reference counted, so clones share the connection pool).
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).user_agent(AGENT).build()
}

// A GitHub API client for one caller
//
// The token belongs to whoever made the request, so a GitHubClient is
// cheap to build per request from the shared reqwest Client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(http: Client, api_url: &str) -> Result<Self, GitHubError> {
        let api_url = Url::parse(api_url).map_err(|_| GitHubError::InvalidUrl(api_url.to_string()))?;
        if api_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidUrl(api_url.to_string()));
        }

        Ok(GitHubClient {
            http,
            api_url,
            token: None,
        })
    }

    // Attaches a bearer token (None keeps the client anonymous)
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    // Fetches the README of a repository as text
    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, GitHubError> {
        let url = self.endpoint(&["repos", owner, repo, "readme"])?;
        self.get_text(url).await
    }

    // Lists the entries of a directory in a repository
    //
    // path is split on '/' and every part is percent-encoded, so "#" is
    // sent as "%23" and non-ASCII names survive.
    pub async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, GitHubError> {
        let url = self.contents_url(owner, repo, path)?;
        let response = self.send(self.request(url, JSON_MEDIA_TYPE)).await?;
        let entries = response.json::<Vec<DirectoryEntry>>().await?;

        debug!(owner, repo, path, count = entries.len(), "Listed directory");
        Ok(entries)
    }

    // Fetches the raw content of one file in a repository
    pub async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, GitHubError> {
        let url = self.contents_url(owner, repo, path)?;
        self.get_text(url).await
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url, GitHubError> {
        let mut segments = vec!["repos", owner, repo, "contents"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        self.endpoint(&segments)
    }

    // Appends path segments to the API base URL, encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, url: Url, accept: &str) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(ACCEPT, accept)
            .header(USER_AGENT, AGENT);

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_text(&self, url: Url) -> Result<String, GitHubError> {
        let response = self.send(self.request(url, RAW_MEDIA_TYPE)).await?;
        Ok(response.text().await?)
    }

    // Sends a request and turns a non-2xx answer into GitHubError::Status
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, GitHubError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(GitHubError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response)
    }
}

// Turns an incoming Authorization header value into a token
//
// Accepts "Bearer <token>" or a bare token. Blank values mean "anonymous".
//
// Example:
//   "Bearer abc123" -> Some("abc123")
//   ""              -> None
pub fn token_from_header(value: &str) -> Option<String> {
    let token = value.trim();
    let token = token.strip_prefix("Bearer").unwrap_or(token).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

// Parses a GitHub URL to extract owner and repository name
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo
//
// Returns: None if the URL isn't a github.com repository URL
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let url = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let path = url.strip_prefix("github.com/")?;
    let mut parts = path.split('/');

    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next().filter(|s| !s.is_empty())?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    Some((owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup(token: Option<&str>) -> (MockServer, GitHubClient) {
        let server = MockServer::start().await;
        let http = build_http_client(Duration::from_secs(5)).unwrap();
        let client = GitHubClient::new(http, &server.uri())
            .unwrap()
            .with_token(token.map(str::to_string));
        (server, client)
    }

    #[test]
    fn test_token_from_bearer_header() {
        assert_eq!(token_from_header("Bearer abc123"), Some("abc123".to_string()));
        assert_eq!(token_from_header("abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn test_blank_header_is_anonymous() {
        assert_eq!(token_from_header(""), None);
        assert_eq!(token_from_header("Bearer   "), None);
    }

    #[test]
    fn test_parse_github_url() {
        let (owner, repo) = parse_github_url("https://github.com/leachim6/hello-world").unwrap();
        assert_eq!(owner, "leachim6");
        assert_eq!(repo, "hello-world");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let (owner, repo) = parse_github_url("github.com/user/repo.git").unwrap();
        assert_eq!(owner, "user");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(parse_github_url("https://gitlab.com/user/repo").is_none());
        assert!(parse_github_url("https://github.com/user").is_none());
    }

    #[test]
    fn test_hash_path_is_encoded() {
        let client = GitHubClient::new(Client::new(), DEFAULT_API_URL).unwrap();
        let url = client.contents_url("o", "r", "#/🆒").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/o/r/contents/%23/%F0%9F%86%92"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(GitHubClient::new(Client::new(), "not a url").is_err());
        assert!(GitHubClient::new(Client::new(), "mailto:someone@example.com").is_err());
    }

    #[tokio::test]
    async fn test_fetch_readme_with_token() {
        let (server, client) = setup(Some("secret")).await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/readme"))
            .and(header("Authorization", "Bearer secret"))
            .and(header("Accept", RAW_MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_string("* [Go](g/Go.go)\n"))
            .mount(&server)
            .await;

        let readme = client.fetch_readme("owner", "repo").await.unwrap();
        assert_eq!(readme, "* [Go](g/Go.go)\n");
    }

    #[tokio::test]
    async fn test_list_directory() {
        let (server, client) = setup(None).await;

        let body = serde_json::json!([
            { "name": "Go.go", "path": "g/Go.go", "type": "file", "size": 42 },
            { "name": "Groovy.groovy", "path": "g/Groovy.groovy", "type": "file", "size": 17 }
        ]);

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/contents/g"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let entries = client.list_directory("owner", "repo", "g").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Go.go");
        assert_eq!(entries[1].name, "Groovy.groovy");
    }

    #[tokio::test]
    async fn test_fetch_file_content_in_hash_bucket() {
        let (server, client) = setup(None).await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/contents/%23/0815.0815"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<:48:x<:65:=<"))
            .mount(&server)
            .await;

        let code = client
            .fetch_file_content("owner", "repo", "#/0815.0815")
            .await
            .unwrap();
        assert_eq!(code, "<:48:x<:65:=<");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (server, client) = setup(None).await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/missing/readme"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let error = client.fetch_readme("owner", "missing").await.unwrap_err();
        assert!(error.is_not_found());
    }
}
