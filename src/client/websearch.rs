//! Client for the web-search provider.
//!
//! Speaks the SearXNG JSON convention (`/search?q=...&format=json`), the
//! common self-hosted option for agent deployments. The base URL comes
//! from configuration so any provider with a compatible shape works.

use crate::client::error::UpstreamError;
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Interface to the search provider.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Run a text search, returning at most `max_results` raw results.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchResult>, UpstreamError>;
}

/// One raw search result. Field names vary across providers (`body` vs
/// `content`, `href` vs `url`), hence the aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResult {
    /// Result title.
    #[serde(default)]
    pub title: Option<String>,
    /// Snippet text.
    #[serde(default, alias = "body")]
    pub content: Option<String>,
    /// Result URL.
    #[serde(default, alias = "href")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawSearchResult>,
}

/// HTTP client for the search provider.
pub struct WebSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebSearchClient {
    /// Create a client against the default local host.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a specific host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for WebSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchApi for WebSearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchResult>, UpstreamError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::api(status.as_u16(), body.trim().to_string()));
        }

        let mut body: SearchResponse = response.json().await?;
        body.results.truncate(max_results);
        Ok(body.results)
    }
}
