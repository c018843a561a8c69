//! Utility functions for string handling, URL inspection and file system checks.
//!
//! - Character-safe truncation for snippets and log previews
//! - Host extraction for labelling results by origin
//! - File system validation for the JSON output directory

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Keep at most `max` characters of `s`.
///
/// Counts Unicode scalar values rather than bytes, so multi-byte text is
/// never split inside a character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("short", 100), "short");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let kept = truncate_chars(s, max);
    if kept.len() == s.len() {
        kept
    } else {
        let dropped = s.len() - kept.len();
        format!("{kept}…(+{dropped} bytes)")
    }
}

/// Extract the host component of a URL, e.g. `"https://example.com/a"` -> `"example.com"`.
///
/// Returns `None` when the input is not an absolute URL or has no host
/// (`mailto:`, `data:`, `file:///` and the like).
pub fn host_of(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and removes a
/// probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_ascii() {
        let s = "x".repeat(1000);
        let out = truncate_chars(&s, 400);
        assert_eq!(out.chars().count(), 400);
        assert_eq!(out, &s[..400]);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("日本語のニュース", 3), "日本語");
    }

    #[test]
    fn test_truncate_chars_short_input() {
        assert_eq!(truncate_chars("", 400), "");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 bytes)"));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://example.com/path"), Some("example.com".to_string()));
        assert_eq!(
            host_of("http://news.example.co.uk:8080/a?b=c"),
            Some("news.example.co.uk".to_string())
        );
    }

    #[test]
    fn test_host_of_without_host() {
        assert_eq!(host_of(""), None);
        assert_eq!(host_of("not a url"), None);
        assert_eq!(host_of("/relative/path"), None);
        assert_eq!(host_of("mailto:desk@example.com"), None);
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");
        let path = nested.to_str().unwrap();

        ensure_writable_dir(path).await.unwrap();
        assert!(nested.is_dir());
    }
}
