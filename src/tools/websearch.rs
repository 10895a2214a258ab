//! Web search adapter.

use crate::client::websearch::SearchApi;
use crate::client::UpstreamError;
use crate::config::SearchSettings;
use crate::tools::{optional_u64, required_str, ToolAdapter, ToolError, ToolOutcome};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// One normalized search result, ready for LLM display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    /// Result title, or `No title`.
    pub title: String,
    /// Snippet text, or `No summary`.
    pub summary: String,
    /// Result URL, empty when the provider gives none.
    pub url: String,
}

/// Tool that runs a general web search, for travel questions the other
/// tools cannot answer (visa rules, local events, transit advice).
pub struct WebSearchTool {
    api: Arc<dyn SearchApi>,
    settings: SearchSettings,
}

impl WebSearchTool {
    /// Create the tool with the given search API and settings.
    pub fn new(api: Arc<dyn SearchApi>, settings: SearchSettings) -> Self {
        Self { api, settings }
    }

    async fn run(&self, args: &Value) -> Result<Vec<SearchSummary>, ToolError> {
        let query = required_str(args, "query")?;
        let limit = optional_u64(args, "num_results")
            .map(|n| n as usize)
            .unwrap_or(self.settings.max_results);

        let results = self.api.search(query, limit).await?;

        Ok(results
            .into_iter()
            .map(|r| SearchSummary {
                title: r.title.unwrap_or_else(|| "No title".to_string()),
                summary: r.content.unwrap_or_else(|| "No summary".to_string()),
                url: r.url.unwrap_or_default(),
            })
            .collect())
    }

    fn describe_error(&self, err: ToolError) -> String {
        match err {
            ToolError::MissingArgument { .. } => err.to_string(),
            ToolError::Upstream(UpstreamError::Transport(e)) => {
                format!("Error contacting search service: {}", e)
            }
            ToolError::Upstream(e) => format!("Error performing web search: {}", e),
            other => format!("Unexpected error: {}", other),
        }
    }
}

#[async_trait]
impl ToolAdapter for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information on any travel-related question"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (e.g. 'visa requirements for US citizens visiting Japan')"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results to return (default: 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: Value) -> ToolOutcome {
        match self.run(&arguments).await {
            Ok(results) if results.is_empty() => ToolOutcome::error("No search results found"),
            Ok(results) => ToolOutcome::success("results", json!(results)),
            Err(e) => ToolOutcome::error(self.describe_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::websearch::RawSearchResult;
    use std::sync::Mutex;

    struct StubSearchApi {
        results: Vec<RawSearchResult>,
        last_limit: Mutex<Option<usize>>,
    }

    impl StubSearchApi {
        fn with_results(results: Vec<RawSearchResult>) -> Self {
            Self {
                results,
                last_limit: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl SearchApi for StubSearchApi {
        async fn search(
            &self,
            _query: &str,
            max_results: usize,
        ) -> Result<Vec<RawSearchResult>, UpstreamError> {
            *self.last_limit.lock().unwrap() = Some(max_results);
            let mut results = self.results.clone();
            results.truncate(max_results);
            Ok(results)
        }
    }

    fn raw(title: &str, content: &str, url: &str) -> RawSearchResult {
        serde_json::from_value(json!({"title": title, "content": content, "url": url})).unwrap()
    }

    #[tokio::test]
    async fn test_execute_success_envelope() {
        let tool = WebSearchTool::new(
            Arc::new(StubSearchApi::with_results(vec![raw(
                "Paris travel guide",
                "Top sights and itineraries",
                "https://example.com/paris",
            )])),
            SearchSettings::default(),
        );

        let value = tool
            .execute(json!({"query": "things to do in Paris"}))
            .await
            .to_value();
        assert_eq!(value["status"], "success");

        let results = value["results"].as_array().unwrap();
        assert_eq!(results[0]["title"], "Paris travel guide");
        assert_eq!(results[0]["summary"], "Top sights and itineraries");
        assert_eq!(results[0]["url"], "https://example.com/paris");
    }

    #[tokio::test]
    async fn test_execute_defaults_missing_fields() {
        let tool = WebSearchTool::new(
            Arc::new(StubSearchApi::with_results(vec![RawSearchResult::default()])),
            SearchSettings::default(),
        );

        let value = tool.execute(json!({"query": "anything"})).await.to_value();
        let results = value["results"].as_array().unwrap();
        assert_eq!(results[0]["title"], "No title");
        assert_eq!(results[0]["summary"], "No summary");
        assert_eq!(results[0]["url"], "");
    }

    #[tokio::test]
    async fn test_execute_respects_num_results() {
        let results = (0..10)
            .map(|i| raw(&format!("Result {}", i), "...", "https://example.com"))
            .collect();
        let api = Arc::new(StubSearchApi::with_results(results));
        let tool = WebSearchTool::new(api.clone(), SearchSettings::default());

        let value = tool
            .execute(json!({"query": "events", "num_results": 3}))
            .await
            .to_value();
        assert_eq!(value["results"].as_array().unwrap().len(), 3);
        assert_eq!(*api.last_limit.lock().unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_execute_default_limit() {
        let results = (0..10)
            .map(|i| raw(&format!("Result {}", i), "...", "https://example.com"))
            .collect();
        let api = Arc::new(StubSearchApi::with_results(results));
        let tool = WebSearchTool::new(api.clone(), SearchSettings::default());

        tool.execute(json!({"query": "events"})).await;
        assert_eq!(*api.last_limit.lock().unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_execute_no_results() {
        let tool = WebSearchTool::new(
            Arc::new(StubSearchApi::with_results(vec![])),
            SearchSettings::default(),
        );

        let value = tool.execute(json!({"query": "zzz"})).await.to_value();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "No search results found");
    }

    #[tokio::test]
    async fn test_execute_missing_query() {
        let tool = WebSearchTool::new(
            Arc::new(StubSearchApi::with_results(vec![])),
            SearchSettings::default(),
        );

        let value = tool.execute(json!({})).await.to_value();
        assert_eq!(value["status"], "error");
        assert!(value["error"].as_str().unwrap().contains("query"));
    }
}
