// file: src/github/client.rs
// description: GitHub REST client listing the repositories of an organization
// reference: https://docs.github.com/en/rest/repos/repos#list-organization-repositories

use crate::error::{Result, SyncError};
use crate::models::RemoteRepository;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::debug;

pub const API_VERSION: &str = "2022-11-28";
const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const MAX_ERROR_BODY: usize = 200;

pub struct GithubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn org_repos_url(&self, organization: &str) -> String {
        format!("{}/orgs/{}/repos", self.api_url, organization)
    }

    /// Fetches the first page of `GET /orgs/{org}/repos`, keeping the order
    /// GitHub returns.
    pub async fn list_org_repositories(&self, organization: &str) -> Result<Vec<RemoteRepository>> {
        let url = self.org_repos_url(organization);

        debug!("Requesting repository list from {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .await
            .map_err(|source| SyncError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SyncError::ApiStatus {
                url,
                status,
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        let body = response.text().await.map_err(|source| SyncError::Transport {
            url: url.clone(),
            source,
        })?;

        let repositories = parse_repositories(&url, &body)?;
        debug!("Received {} repositories", repositories.len());

        Ok(repositories)
    }
}

fn parse_repositories(url: &str, body: &str) -> Result<Vec<RemoteRepository>> {
    let format_error = |message: String| SyncError::ResponseFormat {
        url: url.to_string(),
        message,
    };

    let value: Value =
        serde_json::from_str(body).map_err(|e| format_error(format!("invalid JSON: {}", e)))?;

    if !value.is_array() {
        return Err(format_error(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| format_error(format!("invalid repository: {}", e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
