//! Tavily Search API retriever.
//!
//! Posts a basic-depth, news-topic search to [Tavily](https://docs.tavily.com)
//! and labels each hit with the host of its URL.

use super::{RetrieveError, Retriever, endpoint, read_json};
use crate::config::Config;
use crate::models::ResultRecord;
use crate::utils::{host_of, truncate_chars};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Source name used when a result's URL has no usable host.
pub const FALLBACK_SOURCE_NAME: &str = "Tavily";

/// Maximum snippet length, in characters.
pub const SNIPPET_MAX_CHARS: usize = 400;

#[derive(Debug, Clone)]
pub struct TavilyRetriever {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl TavilyRetriever {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.tavily_api_key.clone(),
            base_url: config.tavily_base_url.clone(),
            timeout: config.retriever_timeout,
        }
    }

    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        api_key: &str,
    ) -> Result<Vec<ResultRecord>, RetrieveError> {
        let payload = SearchRequest {
            api_key,
            query,
            max_results: limit,
            search_depth: "basic",
            topic: "news",
        };

        let response = self
            .client
            .post(endpoint(&self.base_url, "search"))
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        let body: SearchResponse = read_json(response).await?;
        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(SearchResult::into_record)
            .collect())
    }
}

impl Retriever for TavilyRetriever {
    fn name(&self) -> &'static str {
        "Tavily"
    }

    #[instrument(level = "info", skip_all, fields(%query, limit))]
    async fn search(&self, query: &str, limit: usize) -> Vec<ResultRecord> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("TAVILY_API_KEY is not set; skipping Tavily");
            return Vec::new();
        };

        let t0 = Instant::now();
        match self.fetch(query, limit, api_key).await {
            Ok(records) => {
                info!(
                    count = records.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched Tavily results"
                );
                debug!(links = ?records.iter().map(|r| &r.link).collect::<Vec<_>>(), "Tavily links");
                records
            }
            Err(e) => {
                error!(
                    error = %e,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Error calling Tavily API"
                );
                Vec::new()
            }
        }
    }
}

/// Label a result by the host of its URL, falling back to [`FALLBACK_SOURCE_NAME`].
fn source_name_for(link: &str) -> String {
    host_of(link).unwrap_or_else(|| FALLBACK_SOURCE_NAME.to_string())
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
    topic: &'static str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl SearchResult {
    fn into_record(self) -> ResultRecord {
        let link = self.url.unwrap_or_default();
        let source_name = source_name_for(&link);
        ResultRecord {
            title: self.title.unwrap_or_default(),
            snippet: truncate_chars(self.content.as_deref().unwrap_or_default(), SNIPPET_MAX_CHARS),
            link,
            source_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn config_for(server: &mockito::ServerGuard) -> Config {
        Config {
            tavily_api_key: Some("tvly-test".to_string()),
            tavily_base_url: server.url(),
            ..Config::default()
        }
    }

    #[test]
    fn test_source_name_from_host() {
        assert_eq!(source_name_for("https://example.com/path"), "example.com");
        assert_eq!(source_name_for("https://www.bbc.co.uk/news/1"), "www.bbc.co.uk");
    }

    #[test]
    fn test_source_name_fallback() {
        assert_eq!(source_name_for(""), FALLBACK_SOURCE_NAME);
        assert_eq!(source_name_for("example.com/path"), FALLBACK_SOURCE_NAME);
        assert_eq!(source_name_for("https://"), FALLBACK_SOURCE_NAME);
        assert_eq!(source_name_for("mailto:tips@example.com"), FALLBACK_SOURCE_NAME);
    }

    #[test]
    fn test_long_content_is_capped() {
        let content = "abcdefghij".repeat(100);
        let result = SearchResult {
            title: Some("Long".to_string()),
            url: Some("https://example.com/long".to_string()),
            content: Some(content.clone()),
        };

        let record = result.into_record();
        assert_eq!(record.snippet.chars().count(), SNIPPET_MAX_CHARS);
        assert_eq!(record.snippet, content[..SNIPPET_MAX_CHARS]);
    }

    #[tokio::test]
    async fn test_posts_expected_body_and_maps_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_body(Matcher::Json(json!({
                "api_key": "tvly-test",
                "query": "model releases",
                "max_results": 3,
                "search_depth": "basic",
                "topic": "news"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "query": "model releases",
                    "results": [
                        {"title": "First", "url": "https://example.com/path", "content": "alpha", "score": 0.9},
                        {"title": "Second", "url": "", "content": null},
                        {"title": "Third", "url": "https://news.example.org/x", "content": "gamma"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let retriever = TavilyRetriever::new(&config_for(&server));
        let records = retriever.search("model releases", 3).await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "First");
        assert_eq!(records[0].source_name, "example.com");
        assert_eq!(records[0].snippet, "alpha");
        assert_eq!(records[1].link, "");
        assert_eq!(records[1].snippet, "");
        assert_eq!(records[1].source_name, FALLBACK_SOURCE_NAME);
        assert_eq!(records[2].source_name, "news.example.org");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_content_of_1000_chars_truncated_to_400() {
        let content = "x".repeat(1000);
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(200)
            .with_body(
                json!({"results": [{"title": "t", "url": "https://example.com/a", "content": &content}]})
                    .to_string(),
            )
            .create_async()
            .await;

        let retriever = TavilyRetriever::new(&config_for(&server));
        let records = retriever.search("ai", 5).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].snippet.len(), 400);
        assert_eq!(records[0].snippet, content[..400]);
    }

    #[tokio::test]
    async fn test_unauthorized_returns_empty() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .with_status(401)
            .with_body(r#"{"detail": {"error": "Unauthorized: missing or invalid API key."}}"#)
            .create_async()
            .await;

        let retriever = TavilyRetriever::new(&config_for(&server));
        assert!(retriever.search("ai", 5).await.is_empty());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_json_returns_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(200)
            .with_body(r#"{"results": [{"title": 42}"#)
            .create_async()
            .await;

        let retriever = TavilyRetriever::new(&config_for(&server));
        assert!(retriever.search("ai", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_results_key_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(200)
            .with_body(r#"{"query": "ai", "answer": null}"#)
            .create_async()
            .await;

        let retriever = TavilyRetriever::new(&config_for(&server));
        assert!(retriever.search("ai", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_returns_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(2));
                w.write_all(b"{\"results\": []}")
            })
            .create_async()
            .await;

        let config = Config {
            retriever_timeout: Duration::from_millis(300),
            ..config_for(&server)
        };
        let retriever = TavilyRetriever::new(&config);
        assert!(retriever.search("ai", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_skips_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let config = Config {
            tavily_api_key: None,
            ..config_for(&server)
        };
        let retriever = TavilyRetriever::new(&config);
        assert!(retriever.search("ai", 5).await.is_empty());

        mock.assert_async().await;
    }
}
