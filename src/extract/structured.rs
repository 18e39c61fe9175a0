//! Readability-based article extraction.
//!
//! The page is parsed with `dom_smoothie`, a port of Mozilla's Readability,
//! which scores the DOM and keeps the main article body. Only the plain text
//! of that body is returned.

use super::ExtractionStrategy;
use crate::error::NewsError;
use crate::http::fetch_text;
use async_trait::async_trait;
use dom_smoothie::{Config, Readability};
use reqwest::Client;
use tracing::{debug, instrument};

/// First extraction attempt: download the page and keep what Readability
/// identifies as the article body.
pub struct StructuredStrategy {
    client: Client,
}

impl StructuredStrategy {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExtractionStrategy for StructuredStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }

    #[instrument(level = "debug", skip(self))]
    async fn extract(&self, url: &str) -> Result<String, NewsError> {
        let html = fetch_text(&self.client, url).await?;
        article_text(&html, Some(url))
    }
}

/// Run Readability over `html` and return the article's plain text.
///
/// # Arguments
///
/// * `html` - Full page markup
/// * `url` - Page URL, used to resolve relative links; may be omitted
///
/// # Errors
///
/// Returns [`NewsError::Parse`] when Readability cannot build a document or
/// finds no article in it.
pub fn article_text(html: &str, url: Option<&str>) -> Result<String, NewsError> {
    let cfg = Config {
        max_elements_to_parse: 9000,
        ..Default::default()
    };

    let mut readability = Readability::new(html, url, Some(cfg))
        .map_err(|e| NewsError::Parse(format!("readability setup failed: {}", e)))?;
    let article = readability
        .parse()
        .map_err(|e| NewsError::Parse(format!("readability parse failed: {}", e)))?;

    let text = article.text_content.trim().to_string();
    debug!(title = %article.title, chars = text.chars().count(), "Readability parsed article");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_html() -> String {
        let paragraph = "The committee met on Tuesday to review the proposal for the new \
            harbour bridge, which engineers say will cut commuting times across the bay \
            by nearly half once it opens to traffic in the spring of next year.";
        let body = (0..6)
            .map(|i| format!("<p>{} Paragraph number {}.</p>", paragraph, i))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            r#"<!DOCTYPE html>
            <html>
            <head><title>Harbour bridge approved</title></head>
            <body>
                <nav><a href="/">Home</a> <a href="/world">World</a></nav>
                <article>
                    <h1>Harbour bridge approved</h1>
                    {}
                </article>
                <footer>Copyright Example News</footer>
            </body>
            </html>"#,
            body
        )
    }

    #[test]
    fn test_article_text_keeps_body() {
        let text = article_text(&article_html(), Some("https://news.example.com/bridge")).unwrap();
        assert!(text.contains("harbour bridge"));
        assert!(text.contains("Paragraph number 5"));
        assert!(text.chars().count() > 300);
    }
}
