//! # News AI
//!
//! A small retrieve-and-summarize tool for AI industry news. It queries
//! NewsAPI.org and/or Tavily for fresh articles, merges the results, and asks
//! an OpenAI-compatible LLM to summarize them against the user's question.
//!
//! ## Usage
//!
//! ```sh
//! news_ai "open-weight model releases" --source both
//! ```
//!
//! API keys are read from flags, the environment, or a `.env` file:
//! `NEWSAPI_KEY`, `TAVILY_API_KEY`, `OPENAI_API_KEY`. A missing key only
//! disables the capability that needs it.
//!
//! ## Architecture
//!
//! 1. **Retrieval**: NewsAPI.org, then Tavily, strictly in sequence
//! 2. **Merge**: concatenate results, NewsAPI.org first
//! 3. **Context**: render each result as a labelled block
//! 4. **Summary**: one chat-completion call, skipped when nothing was found
//! 5. **Output**: Markdown to stdout, optional JSON file

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod context;
mod models;
mod outputs;
mod pipeline;
mod retrievers;
mod summarizer;
mod utils;

use cli::Cli;
use config::Config;
use outputs::{json, markdown};
use pipeline::Pipeline;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env before anything reads the environment.
    let dotenv = dotenvy::dotenv();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    match &dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env loaded"),
    }

    let start_time = std::time::Instant::now();
    info!("news_ai starting up");

    let args = Cli::parse();
    let config = Config::from_cli(&args);
    debug!(?config, source = ?args.source, "Parsed CLI arguments");

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let query = args.effective_query();
    info!(%query, source = %args.source, "Fetching the latest AI updates");

    let pipeline = Pipeline::from_config(&config);
    let digest = pipeline.run(&query, args.source).await;

    print!("{}", markdown::digest_to_markdown(&digest));

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_digest(&digest, dir).await {
            error!(error = %e, "Failed to write JSON digest");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        results = digest.results.len(),
        summarized = digest.summary.as_ref().is_some_and(|s| s.is_summary()),
        "Execution complete"
    );

    Ok(())
}
