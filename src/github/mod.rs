//! GitHub REST API client.
//!
//! Thin wrapper over reqwest: one attempt per call, bounded timeout, and a
//! single `Unavailable` error for every failure mode. Callers decide which
//! HTTP status an unavailable upstream maps to; this layer deliberately does
//! not distinguish "not found" from "rate limited" from "network error".

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::models::RawRepository;

/// Base URL of the GitHub REST API.
pub const API_BASE: &str = "https://api.github.com";

/// User agent sent on every request. GitHub rejects anonymous agents.
const USER_AGENT: &str = concat!("gitscope/", env!("CARGO_PKG_VERSION"));

/// Upstream request timeout. The only mandatory timeout in the system.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub client error.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Transport error, timeout, or non-2xx response.
    #[error("GitHub API unavailable: {0}")]
    Unavailable(String),
}

/// Response envelope of the repository search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<RawRepository>,
}

/// GitHub API client with optional token authentication.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    pub fn new(token: Option<String>) -> Self {
        Self::with_base(API_BASE, token)
    }

    /// Create a client against an arbitrary base URL (tests).
    pub fn with_base(base: &str, token: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        let base = Url::parse(base).expect("invalid API base URL");

        Self {
            client,
            base,
            token,
        }
    }

    /// Whether a token is configured for authenticated requests.
    pub fn token_configured(&self) -> bool {
        self.token.is_some()
    }

    /// GET a JSON document from the API.
    ///
    /// Query parameters with a `None` value are omitted from the request,
    /// never sent as empty strings. Single attempt, no retries.
    pub async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, Option<&str>)],
    ) -> Result<serde_json::Value, GithubError> {
        let url = build_url(&self.base, endpoint, params)
            .map_err(|e| GithubError::Unavailable(e.to_string()))?;

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| GithubError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "GitHub API request failed");
            return Err(GithubError::Unavailable(format!("status {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| GithubError::Unavailable(e.to_string()))
    }
}

/// Join base + endpoint and append the present query parameters.
fn build_url(
    base: &Url,
    endpoint: &str,
    params: &[(&str, Option<&str>)],
) -> Result<Url, url::ParseError> {
    let mut url = base.join(endpoint.trim_start_matches('/'))?;

    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            if let Some(value) = value {
                pairs.append_pair(key, value);
            }
        }
    }
    // query_pairs_mut leaves a dangling '?' when nothing was appended
    if url.query().is_some_and(str::is_empty) {
        url.set_query(None);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_omits_absent_params() {
        let base = Url::parse(API_BASE).unwrap();
        let url = build_url(
            &base,
            "search/repositories",
            &[
                ("q", Some("rust")),
                ("sort", None),
                ("order", None),
                ("page", Some("1")),
            ],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.github.com/search/repositories?q=rust&page=1"
        );
    }

    #[test]
    fn test_build_url_strips_leading_slash() {
        let base = Url::parse(API_BASE).unwrap();
        let url = build_url(&base, "/repos/octocat/Hello-World", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/octocat/Hello-World");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_unavailable() {
        // Nothing listens on the discard port; connection is refused fast.
        let client = GithubClient::with_base("http://127.0.0.1:9/", None);
        let result = client.get_json("repos/octocat/Hello-World", &[]).await;
        assert!(matches!(result, Err(GithubError::Unavailable(_))));
    }

    #[test]
    fn test_search_results_parse_with_defaults() {
        let results: SearchResults = serde_json::from_value(serde_json::json!({
            "total_count": 2,
            "items": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}],
        }))
        .unwrap();

        assert_eq!(results.total_count, 2);
        assert!(!results.incomplete_results);
        assert_eq!(results.items.len(), 2);
    }
}
