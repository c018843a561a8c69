//! Runtime configuration shared by every pipeline component.
//!
//! A [`Config`] is built once at startup from the parsed [`Cli`] (which in
//! turn reads flags, environment variables and the `.env` file) and then
//! passed by reference into each retriever and the summarizer.

use crate::cli::Cli;
use std::time::Duration;

pub const DEFAULT_NEWSAPI_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Timeout applied to every retriever request.
pub const RETRIEVER_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for the model completion request.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Config {
    pub newsapi_key: Option<String>,
    pub tavily_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub newsapi_base_url: String,
    pub tavily_base_url: String,
    pub openai_base_url: String,
    pub model: String,
    pub max_results: usize,
    pub retriever_timeout: Duration,
    pub llm_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            newsapi_key: None,
            tavily_api_key: None,
            openai_api_key: None,
            newsapi_base_url: DEFAULT_NEWSAPI_BASE_URL.to_string(),
            tavily_base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            retriever_timeout: RETRIEVER_TIMEOUT,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            newsapi_key: non_blank(cli.newsapi_key.as_deref()),
            tavily_api_key: non_blank(cli.tavily_api_key.as_deref()),
            openai_api_key: non_blank(cli.openai_api_key.as_deref()),
            newsapi_base_url: cli.newsapi_base_url.clone(),
            tavily_base_url: cli.tavily_base_url.clone(),
            openai_base_url: cli.openai_base_url.clone(),
            model: cli.model.clone(),
            max_results: cli.max_results,
            retriever_timeout: RETRIEVER_TIMEOUT,
            llm_timeout: Duration::from_secs(cli.llm_timeout_secs),
        }
    }
}

// Keys are secrets; never let them reach a log line through `{:?}`.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "<set>"))
            .field("tavily_api_key", &self.tavily_api_key.as_ref().map(|_| "<set>"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<set>"))
            .field("newsapi_base_url", &self.newsapi_base_url)
            .field("tavily_base_url", &self.tavily_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("max_results", &self.max_results)
            .field("retriever_timeout", &self.retriever_timeout)
            .field("llm_timeout", &self.llm_timeout)
            .finish()
    }
}

/// An empty or whitespace-only key counts as unset.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
