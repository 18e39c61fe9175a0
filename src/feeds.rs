//! Google News RSS feed client.
//!
//! Three entry points share one request path and differ only in the URL:
//!
//! | Feed | URL template |
//! |------|--------------|
//! | [`Feed::Top`] | `https://news.google.com/news/rss` |
//! | [`Feed::Category`] | `https://news.google.com/news/rss/headlines/section/topic/{topic}` |
//! | [`Feed::Search`] | `https://news.google.com/rss/search?q={query}` |
//!
//! Failures never escape [`FeedClient::fetch_items`]: they are logged and the
//! caller sees an empty list. Quantity limiting is left to the caller.

use crate::config::{FeedConfig, HttpConfig};
use crate::error::NewsError;
use crate::http::{build_client, fetch_text};
use crate::models::NewsItem;
use clap::ValueEnum;
use reqwest::Client;
use std::fmt;
use tracing::{debug, error, info, instrument};

/// Google News topic sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum Topic {
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::World => "WORLD",
            Topic::Nation => "NATION",
            Topic::Business => "BUSINESS",
            Topic::Technology => "TECHNOLOGY",
            Topic::Entertainment => "ENTERTAINMENT",
            Topic::Sports => "SPORTS",
            Topic::Science => "SCIENCE",
            Topic::Health => "HEALTH",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which feed to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Top,
    Category(Topic),
    Search(String),
}

impl Feed {
    /// Build the request URL from the configured templates.
    ///
    /// Search queries have their spaces removed before being percent-encoded,
    /// matching how the reader has always queried Google News.
    pub fn url(&self, templates: &FeedConfig) -> String {
        match self {
            Feed::Top => templates.top_url.clone(),
            Feed::Category(topic) => templates.category_url.replace("{topic}", topic.as_str()),
            Feed::Search(query) => {
                let compact: String = query.chars().filter(|c| *c != ' ').collect();
                templates
                    .search_url
                    .replace("{query}", &urlencoding::encode(&compact))
            }
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Top => f.write_str("top stories"),
            Feed::Category(topic) => write!(f, "{} news", topic),
            Feed::Search(query) => write!(f, "search '{}'", query),
        }
    }
}

/// Fetches and parses news feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    templates: FeedConfig,
}

impl FeedClient {
    pub fn new(http: &HttpConfig, templates: FeedConfig) -> Result<Self, NewsError> {
        Ok(Self {
            client: build_client(http)?,
            templates,
        })
    }

    /// Fetch the items of `feed`.
    ///
    /// Returns an empty list on any network or parse failure; the failure is
    /// logged at `error` level so the user still sees why nothing came back.
    #[instrument(level = "info", skip(self), fields(feed = %feed))]
    pub async fn fetch_items(&self, feed: &Feed) -> Vec<NewsItem> {
        match self.try_fetch_items(feed).await {
            Ok(items) => {
                info!(count = items.len(), "Fetched feed items");
                items
            }
            Err(e) => {
                error!(error = %e, "Error fetching news");
                Vec::new()
            }
        }
    }

    async fn try_fetch_items(&self, feed: &Feed) -> Result<Vec<NewsItem>, NewsError> {
        let url = feed.url(&self.templates);
        debug!(%url, "Requesting feed");
        let body = fetch_text(&self.client, &url).await?;
        parse_items(&body)
    }
}

/// Parse an RSS document into [`NewsItem`]s.
///
/// Items without a title or link are skipped. A missing `<source>` or
/// `<pubDate>` becomes an empty string.
///
/// # Errors
///
/// Returns [`NewsError::Parse`] when `xml` is not an RSS document, for
/// example an HTML error page served with a success status.
pub fn parse_items(xml: &str) -> Result<Vec<NewsItem>, NewsError> {
    let channel = rss::Channel::read_from(xml.as_bytes())
        .map_err(|e| NewsError::Parse(format!("Failed to parse feed: {}", e)))?;

    let items = channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title()?.trim().to_string();
            let link = item.link()?.trim().to_string();
            if title.is_empty() || link.is_empty() {
                return None;
            }
            Some(NewsItem {
                title,
                link,
                source: item
                    .source()
                    .and_then(|s| s.title())
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                published_at: item.pub_date().unwrap_or_default().trim().to_string(),
            })
        })
        .collect();

    Ok(items)
}
