//! JSON output of a [`Digest`].
//!
//! # Output Structure
//!
//! Files are grouped by the local date of the run:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 081502.json
//!     └── 174233.json
//! ```

use crate::models::Digest;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path a digest is written to: `{json_output_dir}/{YYYY-MM-DD}/{HHMMSS}.json`.
pub fn digest_path(digest: &Digest, json_output_dir: &str) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(digest.generated_at.format("%Y-%m-%d").to_string())
        .join(format!("{}.json", digest.generated_at.format("%H%M%S")))
}

/// Serialize `digest` as pretty JSON under `json_output_dir`.
///
/// Creates the dated subdirectory if needed and returns the written path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(digest: &Digest, json_output_dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;
    let path = digest_path(digest, json_output_dir);

    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), results = digest.results.len(), "Wrote JSON digest");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultRecord, SourceMode, SummaryOutcome};
    use chrono::{Local, TimeZone};

    fn digest() -> Digest {
        Digest {
            query: "ai".to_string(),
            mode: SourceMode::Tavily,
            results: vec![ResultRecord {
                title: "t".to_string(),
                link: "https://example.com/t".to_string(),
                snippet: "s".to_string(),
                source_name: "example.com".to_string(),
            }],
            summary: Some(SummaryOutcome::CredentialMissing),
            generated_at: Local.with_ymd_and_hms(2025, 5, 6, 8, 15, 2).unwrap(),
        }
    }

    #[test]
    fn test_digest_path() {
        let path = digest_path(&digest(), "/tmp/out");
        assert_eq!(path, PathBuf::from("/tmp/out/2025-05-06/081502.json"));
    }

    #[tokio::test]
    async fn test_write_digest_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();

        let path = write_digest(&digest(), dir).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let back: Digest = serde_json::from_str(&written).unwrap();

        assert_eq!(back.results, digest().results);
        assert_eq!(back.summary, Some(SummaryOutcome::CredentialMissing));
    }
}
