//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the command-line tools.
//! Logs always go to stderr because stdout carries command results. It also
//! provides a sanitiser that keeps credentials and bulky inline image data
//! out of log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for machine ingestion.
/// - `pretty`: Human-readable, multi-line output for debugging.
/// - `compact` (default): One line per event.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };

    // A subscriber may already be installed (e.g. by a test harness).
    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already initialized: {}", e);
    }

    Ok(())
}

static BEARER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(bearer\s+)[A-Za-z0-9._~+/=-]+").expect("valid regex"));

static GITHUB_TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:gh[pousr]_[A-Za-z0-9]{10,}|github_pat_[A-Za-z0-9_]{10,})").expect("valid regex")
});

static DATA_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(;base64,)([A-Za-z0-9+/=]{64,})").expect("valid regex"));

/// Sanitizes sensitive or bulky information from log messages.
///
/// Replaces bearer credentials and GitHub tokens with a `\[REDACTED\]`
/// placeholder, and collapses long inline base64 image payloads to a
/// length marker.
///
/// # Arguments
///
/// * `input` - The raw string that may contain sensitive data.
///
/// # Returns
///
/// A new string where all detected secrets have been replaced.
pub fn sanitize(input: &str) -> String {
    let result = BEARER_PATTERN.replace_all(input, "${1}[REDACTED_TOKEN]");
    let result = GITHUB_TOKEN_PATTERN.replace_all(&result, "[REDACTED_GITHUB_TOKEN]");
    let result = DATA_URL_PATTERN.replace_all(&result, |caps: &regex::Captures| {
        format!("{}<{} chars elided>", &caps[1], caps[2].len())
    });
    result.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_bearer_token() {
        let input = "Authorization: Bearer abc123.secret-value";
        let output = sanitize(input);
        assert!(output.contains("[REDACTED_TOKEN]"));
        assert!(!output.contains("abc123.secret-value"));
    }

    #[test]
    fn test_sanitize_github_token() {
        let input = "token=ghp_0123456789abcdefABCDEF used";
        let output = sanitize(input);
        assert!(output.contains("[REDACTED_GITHUB_TOKEN]"));
        assert!(!output.contains("ghp_0123456789"));
    }

    #[test]
    fn test_sanitize_collapses_data_url() {
        let payload = "A".repeat(200);
        let input = format!("{{\"url\":\"data:image/jpeg;base64,{}\"}}", payload);
        let output = sanitize(&input);
        assert!(output.contains("data:image/jpeg;base64,<200 chars elided>"));
        assert!(!output.contains(&payload));
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize("HTTP 500 internal error"), "HTTP 500 internal error");
    }
}
