//! LLM summarization of retrieved news.
//!
//! This module composes the News AI prompt from a user query and a context
//! block and sends it to an OpenAI-compatible chat-completions endpoint.
//!
//! # Architecture
//!
//! - [`Summarize`]: the seam the pipeline depends on
//! - [`LlmSummarizer`]: the HTTP-backed implementation
//! - [`SummarizeError`]: internal failure reasons, folded into
//!   [`SummaryOutcome::CallFailed`] before leaving the summarizer
//!
//! A summarizer never returns an error: a missing credential becomes
//! [`SummaryOutcome::CredentialMissing`] without touching the network, and
//! every call failure becomes [`SummaryOutcome::CallFailed`].

use crate::config::Config;
use crate::models::SummaryOutcome;
use crate::retrievers::endpoint;
use crate::utils::truncate_for_log;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Sampling temperature for every summary request.
pub const TEMPERATURE: f32 = 0.4;

/// System-role instruction sent ahead of the user prompt.
pub const SYSTEM_PROMPT: &str = "You are 'News AI', an assistant that summarizes AI / Generative AI \
news clearly and concisely for the user.";

/// Build the user-role prompt for `query` over the aggregated `context`.
pub fn compose_prompt(query: &str, context: &str) -> String {
    format!(
        "You are an assistant called 'News AI' that summarizes the latest
AI and Generative AI news and relates it to the user's question.

User question:
{query}

Aggregated news results:
{context}

Task:
- Summarize the most important AI-related updates.
- Highlight concrete products, models, companies, or research efforts.
- Point out any noticeable trends (e.g., regulatory changes, funding, new models).
- Keep the answer concise but informative.
"
    )
}

/// Something that can turn a query and its context into a summary.
pub trait Summarize {
    async fn summarize(&self, query: &str, context: &str) -> SummaryOutcome;
}

/// Reasons a completion request can fail.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no message content")]
    EmptyResponse,
}

/// Summarizer backed by an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct LlmSummarizer {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl LlmSummarizer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.model.clone(),
            timeout: config.llm_timeout,
        }
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, SummarizeError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(api_key)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(SummarizeError::Status {
                status,
                body: truncate_for_log(&body, 300),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(SummarizeError::EmptyResponse)
    }

    fn classify(&self, e: reqwest::Error) -> SummarizeError {
        if e.is_timeout() {
            SummarizeError::Timeout(self.timeout)
        } else {
            SummarizeError::Http(e)
        }
    }
}

impl Summarize for LlmSummarizer {
    #[instrument(level = "info", skip_all, fields(model = %self.model, context_bytes = context.len()))]
    async fn summarize(&self, query: &str, context: &str) -> SummaryOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("OPENAI_API_KEY is not set; skipping summarization");
            return SummaryOutcome::CredentialMissing;
        };

        let prompt = compose_prompt(query, context);
        debug!(prompt = %truncate_for_log(&prompt, 500), "Composed prompt");

        let t0 = Instant::now();
        match self.complete(api_key, &prompt).await {
            Ok(text) => {
                info!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    chars = text.chars().count(),
                    "Summary generated"
                );
                SummaryOutcome::Summary(text)
            }
            Err(e) => {
                error!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    error = %e,
                    "Summarization request failed"
                );
                SummaryOutcome::CallFailed(e.to_string())
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
