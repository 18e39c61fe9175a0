//! Article body extraction.
//!
//! News sites vary wildly in markup, so extraction is best effort: an ordered
//! list of [`ExtractionStrategy`] implementations is tried until one recovers
//! enough text.
//!
//! | Order | Strategy | Method |
//! |-------|----------|--------|
//! | 1 | [`structured::StructuredStrategy`] | Readability article parser |
//! | 2 | [`paragraphs::ParagraphStrategy`] | Every `<p>` joined with spaces |
//!
//! A candidate is accepted only when it is strictly longer than the configured
//! minimum (300 characters by default). The first accepted candidate wins and
//! later strategies are never invoked. Each strategy performs its own single
//! download; nothing is cached or retried.

pub mod paragraphs;
pub mod structured;

use crate::config::AppConfig;
use crate::error::NewsError;
use crate::http::build_client;
use crate::models::Extraction;
use crate::utils::char_len;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

pub use paragraphs::ParagraphStrategy;
pub use structured::StructuredStrategy;

/// One way of turning an article URL into plain text.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs and failure reasons.
    fn name(&self) -> &'static str;

    /// Download `url` and return whatever text this strategy recovers.
    ///
    /// Length is not judged here; [`ContentExtractor`] applies the threshold.
    async fn extract(&self, url: &str) -> Result<String, NewsError>;
}

/// Runs the strategies in order and applies the length threshold.
pub struct ContentExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    min_chars: usize,
}

impl ContentExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>, min_chars: usize) -> Self {
        Self {
            strategies,
            min_chars,
        }
    }

    /// Structured extraction first, paragraph scraping second, sharing one client.
    pub fn from_config(config: &AppConfig) -> Result<Self, NewsError> {
        let client = build_client(&config.http)?;
        Ok(Self::new(
            vec![
                Box::new(StructuredStrategy::new(client.clone())),
                Box::new(ParagraphStrategy::new(client)),
            ],
            config.extraction.min_article_chars,
        ))
    }

    /// Extract article text from `url`.
    ///
    /// # Arguments
    ///
    /// * `url` - Article URL; each strategy downloads it on its own
    ///
    /// # Returns
    ///
    /// [`Extraction::Text`] with the first candidate strictly longer than the
    /// minimum, otherwise [`Extraction::Failure`] naming the last strategy's
    /// problem. Never an error: the caller treats a failure as "no content".
    #[instrument(level = "info", skip(self))]
    pub async fn extract(&self, url: &str) -> Extraction {
        let mut last_failure = String::from("no extraction strategies configured");

        for strategy in &self.strategies {
            let outcome = strategy.extract(url).await.and_then(|text| {
                let length = char_len(&text);
                if length > self.min_chars {
                    Ok(text)
                } else {
                    Err(NewsError::ExtractionInsufficient {
                        length,
                        threshold: self.min_chars,
                    })
                }
            });

            match outcome {
                Ok(text) => {
                    info!(strategy = strategy.name(), chars = char_len(&text), "Extracted article text");
                    return Extraction::Text(text);
                }
                Err(e) => {
                    debug!(strategy = strategy.name(), error = %e, "Strategy did not yield enough text");
                    last_failure = format!("{}: {}", strategy.name(), e);
                }
            }
        }

        warn!(reason = %last_failure, "Couldn't extract article content");
        Extraction::Failure(last_failure)
    }
}
