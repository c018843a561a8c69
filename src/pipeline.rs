//! Retrieve-then-summarize pipeline.
//!
//! The [`Pipeline`] runs the selected retrievers one after the other
//! (NewsAPI.org before Tavily), merges their results in that order, and
//! only when something was found builds a context block and asks the
//! summarizer for a digest.

use crate::config::Config;
use crate::context::build_context;
use crate::models::{Digest, ResultRecord, SourceMode};
use crate::retrievers::Retriever;
use crate::retrievers::newsapi::NewsApiRetriever;
use crate::retrievers::tavily::TavilyRetriever;
use crate::summarizer::{LlmSummarizer, Summarize};
use chrono::Local;
use tracing::{info, instrument};

pub struct Pipeline<N, T, S> {
    newsapi: N,
    tavily: T,
    summarizer: S,
    max_results: usize,
}

impl Pipeline<NewsApiRetriever, TavilyRetriever, LlmSummarizer> {
    /// Wire up the HTTP-backed retrievers and summarizer from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            NewsApiRetriever::new(config),
            TavilyRetriever::new(config),
            LlmSummarizer::new(config),
            config.max_results,
        )
    }
}

impl<N, T, S> Pipeline<N, T, S>
where
    N: Retriever,
    T: Retriever,
    S: Summarize,
{
    pub fn new(newsapi: N, tavily: T, summarizer: S, max_results: usize) -> Self {
        Self {
            newsapi,
            tavily,
            summarizer,
            max_results,
        }
    }

    /// Query the retrievers selected by `mode` in sequence and merge their results.
    #[instrument(level = "info", skip(self))]
    pub async fn retrieve(&self, query: &str, mode: SourceMode) -> Vec<ResultRecord> {
        let mut merged = Vec::new();

        if mode.uses_newsapi() {
            let records = self.newsapi.search(query, self.max_results).await;
            info!(source = self.newsapi.name(), count = records.len(), "Retrieved");
            merged.extend(records);
        }

        if mode.uses_tavily() {
            let records = self.tavily.search(query, self.max_results).await;
            info!(source = self.tavily.name(), count = records.len(), "Retrieved");
            merged.extend(records);
        }

        merged
    }

    /// Retrieve, then summarize if anything was found.
    ///
    /// With no results the summarizer is not called and `summary` is `None`.
    #[instrument(level = "info", skip(self))]
    pub async fn run(&self, query: &str, mode: SourceMode) -> Digest {
        let results = self.retrieve(query, mode).await;

        let summary = if results.is_empty() {
            info!("No results retrieved; skipping summarization");
            None
        } else {
            let context = build_context(&results);
            info!(
                results = results.len(),
                context_bytes = context.len(),
                "Summarizing merged results"
            );
            Some(self.summarizer.summarize(query, &context).await)
        };

        Digest {
            query: query.to_string(),
            mode,
            results,
            summary,
            generated_at: Local::now(),
        }
    }
}
