//! Markdown rendering of a [`Digest`] for the terminal.

use crate::models::Digest;
use std::fmt::Write;

/// Shown instead of a digest when no source returned anything.
pub const NO_RESULTS_MESSAGE: &str = "No results returned. Check your API keys \
(NEWSAPI_KEY / TAVILY_API_KEY) and your network connectivity.";

/// Render the retrieved results followed by the summary.
///
/// Each result is listed as a numbered link with its source name (when
/// non-empty) and snippet, separated by horizontal rules. A digest with no
/// results renders as [`NO_RESULTS_MESSAGE`].
pub fn digest_to_markdown(digest: &Digest) -> String {
    if digest.results.is_empty() {
        return format!("{NO_RESULTS_MESSAGE}\n");
    }

    let mut md = String::new();
    let _ = writeln!(md, "# News AI: {}\n", digest.query);
    let _ = writeln!(
        md,
        "_Source: {} · generated {}_\n",
        digest.mode,
        digest.generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    let _ = writeln!(md, "## Retrieved Articles / Results\n");
    for (i, r) in digest.results.iter().enumerate() {
        let _ = writeln!(md, "**{}. [{}]({})**\n", i + 1, r.title, r.link);
        if !r.source_name.is_empty() {
            let _ = writeln!(md, "_{}_\n", r.source_name);
        }
        if !r.snippet.is_empty() {
            let _ = writeln!(md, "{}\n", r.snippet);
        }
        let _ = writeln!(md, "---\n");
    }

    if let Some(summary) = &digest.summary {
        let _ = writeln!(md, "## News AI Summary\n");
        let _ = writeln!(md, "{summary}");
    }

    md
}
