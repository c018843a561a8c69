//! Data models shared by the retrievers, the summarizer and the outputs.
//!
//! - [`ResultRecord`]: one normalized search hit, whichever API produced it
//! - [`SourceMode`]: which retrievers a run should call
//! - [`SummaryOutcome`]: what the summarizer produced (or why it did not)
//! - [`Digest`]: everything a single run hands back to its caller

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker prepended to the rendered text of a failed model call.
pub const LLM_ERROR_MARKER: &str = "Error calling LLM:";

/// Message shown in place of a summary when no model credential is configured.
pub const CREDENTIAL_MISSING_MESSAGE: &str =
    "OPENAI_API_KEY is not set. Please add it to your .env file to enable News AI summaries.";

/// A single search hit normalized across all sources.
///
/// Every field is always present; upstream nulls and missing keys become
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultRecord {
    /// Headline of the article or page.
    pub title: String,
    /// Canonical URL of the article.
    pub link: String,
    /// Short excerpt used as summarization context.
    pub snippet: String,
    /// Human-readable origin, e.g. `"Reuters"` or `"example.com"`.
    pub source_name: String,
}

/// Which upstream APIs a run should query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// NewsAPI.org only.
    #[value(name = "newsapi")]
    NewsApi,
    /// Tavily only.
    Tavily,
    /// NewsAPI.org first, then Tavily, merged.
    #[default]
    Both,
}

impl SourceMode {
    pub fn uses_newsapi(self) -> bool {
        matches!(self, SourceMode::NewsApi | SourceMode::Both)
    }

    pub fn uses_tavily(self) -> bool {
        matches!(self, SourceMode::Tavily | SourceMode::Both)
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceMode::NewsApi => "NewsAPI.org",
            SourceMode::Tavily => "Tavily",
            SourceMode::Both => "Both (merge results)",
        };
        f.write_str(label)
    }
}

/// Result of asking the language model for a summary.
///
/// Callers branch on the variant; [`fmt::Display`] gives the text shown to
/// the end user for each case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum SummaryOutcome {
    /// The model's reply, verbatim.
    Summary(String),
    /// No model credential was configured, so no call was made.
    CredentialMissing,
    /// The call was attempted and failed for the given reason.
    CallFailed(String),
}

impl SummaryOutcome {
    pub fn is_summary(&self) -> bool {
        matches!(self, SummaryOutcome::Summary(_))
    }
}

impl fmt::Display for SummaryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryOutcome::Summary(text) => f.write_str(text),
            SummaryOutcome::CredentialMissing => f.write_str(CREDENTIAL_MISSING_MESSAGE),
            SummaryOutcome::CallFailed(reason) => write!(f, "{LLM_ERROR_MARKER} {reason}"),
        }
    }
}

/// Everything produced by one pipeline run.
///
/// `summary` is `None` when no results were retrieved and summarization was
/// therefore skipped.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Digest {
    /// The query actually sent upstream.
    pub query: String,
    /// The sources that were consulted.
    pub mode: SourceMode,
    /// Merged results, NewsAPI.org first.
    pub results: Vec<ResultRecord>,
    /// Summary outcome, absent when there was nothing to summarize.
    pub summary: Option<SummaryOutcome>,
    /// When the run finished.
    pub generated_at: DateTime<Local>,
}
