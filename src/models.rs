//! Data models shared across the reader.
//!
//! - [`NewsItem`]: one entry of a news feed
//! - [`Extraction`]: outcome of pulling article text out of a page
//! - [`Rating`] and [`SummaryRecord`]: a row of the feedback log
//! - [`PendingFeedback`]: the article/summary pair waiting for a rating

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// A single feed entry.
///
/// Only the four fields the reader displays are kept. Items are rendered once
/// and dropped; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline as published in the feed.
    pub title: String,
    /// Article URL (Google News links redirect to the publisher).
    pub link: String,
    /// Publisher name, empty if the feed omitted it.
    pub source: String,
    /// Raw `pubDate` text, empty if the feed omitted it.
    pub published_at: String,
}

impl NewsItem {
    /// Parse `published_at` as RFC 2822, falling back to RFC 3339.
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc2822(&self.published_at)
            .or_else(|_| DateTime::parse_from_rfc3339(&self.published_at))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Result of running the content extractor against one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Article body text long enough to summarize.
    Text(String),
    /// No strategy recovered enough text; the reason names the last failure.
    Failure(String),
}

/// Thumbs up or thumbs down on a generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Positive,
    Negative,
}

impl Rating {
    /// Value stored in the `feedback` column.
    pub fn as_flag(self) -> u8 {
        match self {
            Rating::Positive => 1,
            Rating::Negative => 0,
        }
    }
}

/// One row of the feedback log.
///
/// Field order is the column order of the CSV file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    /// Leading part of the article, already truncated.
    pub article: String,
    pub summary: String,
    /// `1` for positive, `0` for negative.
    pub feedback: u8,
    /// Local time, `%Y-%m-%d %H:%M:%S%.6f`.
    pub timestamp: String,
}

impl SummaryRecord {
    pub fn new(article: String, summary: String, rating: Rating, captured_at: DateTime<Local>) -> Self {
        Self {
            article,
            summary,
            feedback: rating.as_flag(),
            timestamp: captured_at.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        }
    }
}

/// The article/summary pair the user is being asked to rate.
///
/// Owned by the session that produced it and cleared once feedback is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFeedback {
    pub excerpt: String,
    pub summary: String,
}
