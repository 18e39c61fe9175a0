//! Per-item processing: extract the article, then summarize it two ways.
//!
//! Items are handled one at a time in feed order and yielded as soon as each
//! one is done, so the caller can show it before the next download starts.
//! Only the first `quantity` items are touched; the rest are never downloaded.

use crate::config::BasicSummaryConfig;
use crate::extract::ContentExtractor;
use crate::heuristic::basic_summary;
use crate::models::{Extraction, NewsItem, PendingFeedback};
use crate::summarizer::Summarize;
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, instrument, warn};

/// What the reader learned about one feed item.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDigest {
    pub item: NewsItem,
    pub outcome: DigestOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DigestOutcome {
    /// Extraction failed; nothing was summarized.
    NoContent { reason: String },
    /// Article text was recovered.
    Summarized {
        article: String,
        /// Model summary, or the error message to show as a warning.
        model_summary: Result<String, String>,
        /// Extractive summary, absent when too short to be useful.
        basic_summary: Option<String>,
    },
}

impl ArticleDigest {
    /// The pair to offer for rating, if a model summary was produced.
    pub fn pending_feedback(&self) -> Option<PendingFeedback> {
        match &self.outcome {
            DigestOutcome::Summarized {
                article,
                model_summary: Ok(summary),
                ..
            } => Some(PendingFeedback {
                excerpt: article.clone(),
                summary: summary.clone(),
            }),
            _ => None,
        }
    }
}

/// Extract and summarize a single item.
#[instrument(level = "info", skip_all, fields(title = %item.title))]
pub async fn digest_item<S: Summarize>(
    item: &NewsItem,
    extractor: &ContentExtractor,
    summarizer: &S,
    basic: &BasicSummaryConfig,
) -> ArticleDigest {
    let article = match extractor.extract(&item.link).await {
        Extraction::Text(text) => text,
        Extraction::Failure(reason) => {
            return ArticleDigest {
                item: item.clone(),
                outcome: DigestOutcome::NoContent { reason },
            };
        }
    };

    let model_summary = summarizer.summarize(&article).await.map_err(|e| {
        warn!(error = %e, "AI summary failed");
        e.to_string()
    });
    let basic_summary = basic_summary(&item.title, &article, basic);
    debug!(basic = basic_summary.is_some(), "Built basic summary");

    ArticleDigest {
        item: item.clone(),
        outcome: DigestOutcome::Summarized {
            article,
            model_summary,
            basic_summary,
        },
    }
}

/// Digest the first `quantity` items, sequentially, as a stream.
///
/// # Arguments
///
/// * `items` - Feed items in feed order
/// * `quantity` - How many items to process; larger than `items.len()` means all
/// * `extractor` - Strategies used to pull article text
/// * `summarizer` - Model summarizer, called only for extracted articles
/// * `basic` - Settings for the extractive summary
///
/// # Returns
///
/// A stream yielding one [`ArticleDigest`] per processed item. Nothing is
/// fetched until the stream is polled, and each item is finished before the
/// next one starts.
pub fn digest_items<'a, S: Summarize + 'a>(
    items: &'a [NewsItem],
    quantity: usize,
    extractor: &'a ContentExtractor,
    summarizer: &'a S,
    basic: &'a BasicSummaryConfig,
) -> impl Stream<Item = ArticleDigest> + 'a {
    debug!(available = items.len(), quantity, "Digesting feed items");
    stream::iter(items.iter().take(quantity)).then(move |item| digest_item(item, extractor, summarizer, basic))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::NewsError;
    use crate::extract::tests::FakeStrategy;
    use crate::feeds::parse_items;
    use crate::feeds::tests::THREE_ITEM_FEED;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Summarizer returning a fixed summary (or error) and counting calls.
    pub(crate) struct FakeSummarizer {
        pub reply: Result<String, String>,
        pub calls: AtomicUsize,
    }

    impl FakeSummarizer {
        pub fn ok(summary: &str) -> Self {
            Self {
                reply: Ok(summary.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: Err("model unavailable".to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Summarize for FakeSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String, NewsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(NewsError::ModelInference)
        }
    }

    async fn collect_digests(
        items: &[NewsItem],
        quantity: usize,
        extractor: &ContentExtractor,
        summarizer: &FakeSummarizer,
    ) -> Vec<ArticleDigest> {
        let basic = BasicSummaryConfig::default();
        digest_items(items, quantity, extractor, summarizer, &basic)
            .collect::<Vec<_>>()
            .await
    }

    fn article_body() -> String {
        "The harbour bridge was approved by the council after a long debate. ".repeat(8)
    }

    #[tokio::test]
    async fn test_only_requested_quantity_is_fetched() {
        let items = parse_items(THREE_ITEM_FEED).unwrap();
        assert_eq!(items.len(), 3);

        let strategy = FakeStrategy::ok("structured", article_body());
        let urls = strategy.urls.clone();
        let extractor = ContentExtractor::new(vec![Box::new(strategy)], 300);
        let summarizer = FakeSummarizer::ok("Bridge approved.");

        let digests = collect_digests(&items, 2, &extractor, &summarizer).await;

        assert_eq!(digests.len(), 2);
        assert_eq!(
            *urls.lock().unwrap(),
            vec![
                "https://news.example.com/articles/one".to_string(),
                "https://news.example.com/articles/two".to_string(),
            ]
        );
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(digests[1].item.title, "Markets rally as inflation cools");
    }

    #[tokio::test]
    async fn test_quantity_larger_than_feed_processes_all() {
        let items = parse_items(THREE_ITEM_FEED).unwrap();
        let extractor = ContentExtractor::new(vec![Box::new(FakeStrategy::ok("structured", article_body()))], 300);
        let summarizer = FakeSummarizer::ok("Bridge approved.");

        let digests = collect_digests(&items, 25, &extractor, &summarizer).await;
        assert_eq!(digests.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_extraction_skips_summarization() {
        let items = parse_items(THREE_ITEM_FEED).unwrap();
        let extractor = ContentExtractor::new(vec![Box::new(FakeStrategy::failing("structured"))], 300);
        let summarizer = FakeSummarizer::ok("unused");

        let digests = collect_digests(&items, 1, &extractor, &summarizer).await;

        assert!(matches!(digests[0].outcome, DigestOutcome::NoContent { .. }));
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
        assert!(digests[0].pending_feedback().is_none());
    }

    #[tokio::test]
    async fn test_model_failure_keeps_basic_summary() {
        let items = parse_items(THREE_ITEM_FEED).unwrap();
        let extractor = ContentExtractor::new(vec![Box::new(FakeStrategy::ok("structured", article_body()))], 300);
        let summarizer = FakeSummarizer::failing();

        let digest = digest_item(&items[0], &extractor, &summarizer, &BasicSummaryConfig::default()).await;

        match &digest.outcome {
            DigestOutcome::Summarized {
                model_summary,
                basic_summary,
                ..
            } => {
                assert!(model_summary.as_ref().unwrap_err().contains("model unavailable"));
                assert!(basic_summary.is_some());
            }
            other => panic!("expected summarized outcome, got {:?}", other),
        }
        assert!(digest.pending_feedback().is_none());
    }

    #[tokio::test]
    async fn test_pending_feedback_carries_article_and_summary() {
        let items = parse_items(THREE_ITEM_FEED).unwrap();
        let extractor = ContentExtractor::new(vec![Box::new(FakeStrategy::ok("structured", article_body()))], 300);
        let summarizer = FakeSummarizer::ok("Bridge approved.");

        let digest = digest_item(&items[0], &extractor, &summarizer, &BasicSummaryConfig::default()).await;
        let pending = digest.pending_feedback().unwrap();
        assert_eq!(pending.excerpt, article_body());
        assert_eq!(pending.summary, "Bridge approved.");
    }

    #[tokio::test]
    async fn test_items_are_fetched_only_as_the_stream_is_polled() {
        let items = parse_items(THREE_ITEM_FEED).unwrap();
        let strategy = FakeStrategy::ok("structured", article_body());
        let urls = strategy.urls.clone();
        let extractor = ContentExtractor::new(vec![Box::new(strategy)], 300);
        let summarizer = FakeSummarizer::ok("Bridge approved.");
        let basic = BasicSummaryConfig::default();

        let mut digests = std::pin::pin!(digest_items(&items, 3, &extractor, &summarizer, &basic));
        assert!(urls.lock().unwrap().is_empty());

        let first = digests.next().await.unwrap();
        assert_eq!(first.item.link, "https://news.example.com/articles/one");
        assert_eq!(urls.lock().unwrap().len(), 1);
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);

        assert!(digests.next().await.is_some());
        assert_eq!(urls.lock().unwrap().len(), 2);
    }
}
