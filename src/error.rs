//! Error types shared by the feed, extraction, summarization and feedback paths.
//!
//! Every variant is caught at the boundary of the component that produced it
//! and turned into a logged diagnostic. Only [`NewsError::Config`] is allowed to
//! end the process, and only during startup.

use thiserror::Error;

/// Errors that can occur while fetching, extracting, summarizing or logging news.
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed, timed out or returned a non-success status
    #[error("Network failure: {0}")]
    Network(String),

    /// Response body could not be parsed (feed XML, article HTML, model JSON)
    #[error("Parse failure: {0}")]
    Parse(String),

    /// A strategy recovered text, but not enough of it
    #[error("Extracted text too short ({length} chars, need more than {threshold})")]
    ExtractionInsufficient {
        /// Characters recovered
        length: usize,
        /// Minimum required, exclusive
        threshold: usize,
    },

    /// The summarization model failed or produced nothing
    #[error("Model inference failed: {0}")]
    ModelInference(String),

    /// Writing the feedback log failed
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for NewsError {
    fn from(e: reqwest::Error) -> Self {
        NewsError::Network(e.to_string())
    }
}

impl From<std::io::Error> for NewsError {
    fn from(e: std::io::Error) -> Self {
        NewsError::Persistence(e.to_string())
    }
}

impl From<csv::Error> for NewsError {
    fn from(e: csv::Error) -> Self {
        NewsError::Persistence(e.to_string())
    }
}
