//! Runtime configuration.
//!
//! Defaults mirror the values the reader has always shipped with. A YAML file
//! passed via `--config` may override any subset of them:
//!
//! ```yaml
//! extraction:
//!   min_article_chars: 400
//! summarizer:
//!   endpoint: http://localhost:8080/v1
//!   temperature: 0.7
//! ```
//!
//! The thresholds and sampling values have no documented tuning behind them;
//! they are kept as configuration rather than treated as product requirements.

use crate::error::NewsError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

/// Desktop browser identity sent with every outbound request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Extracted text must be strictly longer than this to be accepted.
pub const MIN_ARTICLE_CHARS: usize = 300;
/// Article excerpts are cut to this many characters before they are logged.
pub const EXCERPT_MAX_CHARS: usize = 500;
pub const MAX_INPUT_TOKENS: usize = 1024;
pub const MAX_OUTPUT_TOKENS: u32 = 128;
pub const TOP_K: u32 = 50;
pub const TOP_P: f32 = 0.95;
pub const TEMPERATURE: f32 = 0.9;
pub const BASIC_SUMMARY_SENTENCES: usize = 5;
pub const BASIC_SUMMARY_MIN_CHARS: usize = 50;
pub const MAX_NEWS_COUNT: usize = 25;

pub const TOP_FEED_URL: &str = "https://news.google.com/news/rss";
pub const CATEGORY_FEED_URL: &str =
    "https://news.google.com/news/rss/headlines/section/topic/{topic}";
pub const SEARCH_FEED_URL: &str = "https://news.google.com/rss/search?q={query}";

/// Top-level configuration, deserialized from YAML.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub feeds: FeedConfig,
    pub extraction: ExtractionConfig,
    pub summarizer: SummarizerConfig,
    pub basic_summary: BasicSummaryConfig,
    pub feedback: FeedbackConfig,
}

/// Settings shared by every outbound HTTP request.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Feed endpoint templates. `{topic}` and `{query}` are substituted.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub top_url: String,
    pub category_url: String,
    pub search_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            top_url: TOP_FEED_URL.to_string(),
            category_url: CATEGORY_FEED_URL.to_string(),
            search_url: SEARCH_FEED_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    pub min_article_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_article_chars: MIN_ARTICLE_CHARS,
        }
    }
}

/// Model server location and decoding parameters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Base URL of an OpenAI-compatible server, without the `/completions` suffix.
    pub endpoint: String,
    /// Model identifier as known to the server.
    pub model: String,
    pub api_key: Option<String>,
    pub max_input_tokens: usize,
    pub max_output_tokens: u32,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
    /// Inference can be slow on CPU; this is separate from the HTTP timeout.
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/v1".to_string(),
            model: "bart_summarizer_with_rl".to_string(),
            api_key: None,
            max_input_tokens: MAX_INPUT_TOKENS,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            top_k: TOP_K,
            top_p: TOP_P,
            temperature: TEMPERATURE,
            timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BasicSummaryConfig {
    pub sentences: usize,
    pub min_chars: usize,
}

impl Default for BasicSummaryConfig {
    fn default() -> Self {
        Self {
            sentences: BASIC_SUMMARY_SENTENCES,
            min_chars: BASIC_SUMMARY_MIN_CHARS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    pub log_path: PathBuf,
    pub excerpt_max_chars: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("feedback_data/feedback_log.csv"),
            excerpt_max_chars: EXCERPT_MAX_CHARS,
        }
    }
}

/// Load configuration from `path`, or return the defaults when no path is given.
///
/// # Errors
///
/// Returns [`NewsError::Config`] if the file cannot be read or is not valid YAML.
#[instrument(level = "info")]
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, NewsError> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(AppConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .map_err(|e| NewsError::Config(format!("{}: {}", path.display(), e)))?;
    let config = parse_config(&raw)?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parse YAML text into an [`AppConfig`]; missing keys keep their defaults.
pub fn parse_config(raw: &str) -> Result<AppConfig, NewsError> {
    if raw.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(raw).map_err(|e| NewsError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = AppConfig::default();
        assert_eq!(config.extraction.min_article_chars, 300);
        assert_eq!(config.feedback.excerpt_max_chars, 500);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.summarizer.max_input_tokens, 1024);
        assert_eq!(config.summarizer.max_output_tokens, 128);
        assert_eq!(config.summarizer.top_k, 50);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "extraction:\n  min_article_chars: 400\nsummarizer:\n  temperature: 0.5\n";
        let config = parse_config(yaml).unwrap();

        assert_eq!(config.extraction.min_article_chars, 400);
        assert_eq!(config.summarizer.temperature, 0.5);
        assert_eq!(config.summarizer.top_p, TOP_P);
        assert_eq!(config.feeds, FeedConfig::default());
        assert_eq!(config.feedback, FeedbackConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = parse_config("extraction: [not, a, map").unwrap_err();
        assert!(matches!(err, NewsError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_config(Some(Path::new("/nonexistent/innews.yaml"))).unwrap_err();
        assert!(matches!(err, NewsError::Config(_)));
    }
}
