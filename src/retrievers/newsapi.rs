//! NewsAPI.org retriever.
//!
//! Queries the [`/v2/everything`](https://newsapi.org/docs/endpoints/everything)
//! endpoint for English-language articles, most recent first.

use super::{RetrieveError, Retriever, endpoint, read_json};
use crate::config::Config;
use crate::models::ResultRecord;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Source name used when an article carries no `source.name`.
pub const FALLBACK_SOURCE_NAME: &str = "NewsAPI.org";

#[derive(Debug, Clone)]
pub struct NewsApiRetriever {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl NewsApiRetriever {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.newsapi_key.clone(),
            base_url: config.newsapi_base_url.clone(),
            timeout: config.retriever_timeout,
        }
    }

    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        api_key: &str,
    ) -> Result<Vec<ResultRecord>, RetrieveError> {
        let page_size = limit.to_string();
        let response = self
            .client
            .get(endpoint(&self.base_url, "v2/everything"))
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let body: EverythingResponse = read_json(response).await?;
        Ok(body
            .articles
            .unwrap_or_default()
            .into_iter()
            .map(Article::into_record)
            .collect())
    }
}

impl Retriever for NewsApiRetriever {
    fn name(&self) -> &'static str {
        "NewsAPI.org"
    }

    #[instrument(level = "info", skip_all, fields(%query, limit))]
    async fn search(&self, query: &str, limit: usize) -> Vec<ResultRecord> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("NEWSAPI_KEY is not set; skipping NewsAPI.org");
            return Vec::new();
        };

        let t0 = Instant::now();
        match self.fetch(query, limit, api_key).await {
            Ok(records) => {
                info!(
                    count = records.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched NewsAPI.org articles"
                );
                debug!(links = ?records.iter().map(|r| &r.link).collect::<Vec<_>>(), "NewsAPI.org links");
                records
            }
            Err(e) => {
                error!(
                    error = %e,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Error calling NewsAPI.org"
                );
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    #[serde(default)]
    name: Option<String>,
}

impl Article {
    fn into_record(self) -> ResultRecord {
        ResultRecord {
            title: self.title.unwrap_or_default(),
            link: self.url.unwrap_or_default(),
            snippet: self.description.unwrap_or_default(),
            source_name: self
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| FALLBACK_SOURCE_NAME.to_string()),
        }
    }
}
