//! Search/news retrievers that turn a query into [`ResultRecord`]s.
//!
//! Each retriever wraps exactly one upstream API and follows the same
//! contract:
//!
//! 1. **Key check**: without an API key, log and return no results
//! 2. **Request**: a single timed HTTP call, no retries
//! 3. **Normalize**: map the upstream JSON into [`ResultRecord`]s in upstream order
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Fallback source name |
//! |--------|--------|--------|----------------------|
//! | NewsAPI.org | [`newsapi`] | `GET /v2/everything` | `NewsAPI.org` |
//! | Tavily | [`tavily`] | `POST /search` | `Tavily` |
//!
//! Failures of any kind (missing key, transport error, non-2xx status,
//! malformed body) are logged and surface as an empty `Vec`. Nothing a
//! retriever does can abort the pipeline.

use crate::models::ResultRecord;
use crate::utils::truncate_for_log;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod newsapi;
pub mod tavily;

/// A source of search results.
///
/// Implementations must never fail: every error is swallowed at this
/// boundary and turned into an empty result list.
pub trait Retriever {
    /// Human-readable name used in logs.
    fn name(&self) -> &'static str;

    /// Search for `query`, returning at most `limit` records in upstream order.
    async fn search(&self, query: &str, limit: usize) -> Vec<ResultRecord>;
}

/// Errors raised while talking to an upstream search API.
///
/// These never leave a [`Retriever`]; they exist so the request path can use
/// `?` and so logs carry a precise reason.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RetrieveError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RetrieveError::Timeout
        } else {
            RetrieveError::Http(e)
        }
    }
}

/// Read a response body and decode it as JSON, rejecting non-2xx statuses.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, RetrieveError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(RetrieveError::Status {
            status,
            body: truncate_for_log(&body, 200),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Join a base URL and an endpoint path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
