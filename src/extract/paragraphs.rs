//! Raw paragraph scraping, used when the structured parser finds too little.

use super::ExtractionStrategy;
use crate::error::NewsError;
use crate::http::fetch_text;
use async_trait::async_trait;
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::instrument;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));

/// Fallback extraction: download the page again and keep the text of every
/// `<p>` element, ignoring page structure.
pub struct ParagraphStrategy {
    client: Client,
}

impl ParagraphStrategy {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExtractionStrategy for ParagraphStrategy {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    #[instrument(level = "debug", skip(self))]
    async fn extract(&self, url: &str) -> Result<String, NewsError> {
        let html = fetch_text(&self.client, url).await?;
        Ok(paragraph_text(&html))
    }
}

/// Text of every `<p>` element in document order, joined by single spaces.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .join(" ")
}
