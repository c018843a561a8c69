//! Command-line interface definitions for News AI.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! API keys and endpoints can be provided via command-line flags, environment
//! variables, or a `.env` file in the working directory.

use crate::config::{
    DEFAULT_MAX_RESULTS, DEFAULT_MODEL, DEFAULT_NEWSAPI_BASE_URL, DEFAULT_OPENAI_BASE_URL,
    DEFAULT_TAVILY_BASE_URL,
};
use crate::models::SourceMode;
use clap::Parser;

/// Query used when the user leaves the query empty.
pub const DEFAULT_QUERY: &str = "artificial intelligence OR generative AI";

/// Command-line arguments for the News AI application.
///
/// # Examples
///
/// ```sh
/// # Default query, both sources
/// news_ai
///
/// # Tavily only, custom query
/// news_ai "open-weight model releases" --source tavily
///
/// # Also write the digest as JSON
/// news_ai "AI regulation" -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Question or news query (empty uses a default AI news query)
    pub query: Option<String>,

    /// Which news/search source to query
    #[arg(short, long, value_enum, default_value_t = SourceMode::Both)]
    pub source: SourceMode,

    /// Maximum number of results requested from each source
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Optional output directory for a JSON copy of the digest
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// NewsAPI.org API key
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub newsapi_key: Option<String>,

    /// Tavily Search API key
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,

    /// OpenAI API key used for summarization
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Chat model used for summarization
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Timeout in seconds for the summarization request
    #[arg(long, default_value_t = 60)]
    pub llm_timeout_secs: u64,

    /// Base URL of the NewsAPI.org service
    #[arg(long, env = "NEWSAPI_BASE_URL", default_value = DEFAULT_NEWSAPI_BASE_URL)]
    pub newsapi_base_url: String,

    /// Base URL of the Tavily service
    #[arg(long, env = "TAVILY_BASE_URL", default_value = DEFAULT_TAVILY_BASE_URL)]
    pub tavily_base_url: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,
}

impl Cli {
    /// The query to run: the trimmed user input, or [`DEFAULT_QUERY`] when blank.
    pub fn effective_query(&self) -> String {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUERY)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_ai"]);

        assert_eq!(cli.query, None);
        assert_eq!(cli.source, SourceMode::Both);
        assert_eq!(cli.max_results, 5);
        assert_eq!(cli.llm_timeout_secs, 60);
        assert!(cli.json_output_dir.is_none());
        assert_eq!(cli.effective_query(), DEFAULT_QUERY);
    }

    #[test]
    fn test_cli_source_and_query() {
        let cli = Cli::parse_from([
            "news_ai",
            "  open-weight models  ",
            "--source",
            "newsapi",
            "-n",
            "3",
        ]);

        assert_eq!(cli.source, SourceMode::NewsApi);
        assert_eq!(cli.max_results, 3);
        assert_eq!(cli.effective_query(), "open-weight models");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["news_ai", "-s", "tavily", "-j", "/tmp/json"]);

        assert_eq!(cli.source, SourceMode::Tavily);
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }

    #[test]
    fn test_blank_query_uses_default() {
        let cli = Cli::parse_from(["news_ai", "   "]);
        assert_eq!(cli.effective_query(), DEFAULT_QUERY);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let result = Cli::try_parse_from(["news_ai", "--source", "bing"]);
        assert!(result.is_err());
    }
}
