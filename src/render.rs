//! Terminal rendering of digests and summaries as Markdown text.

use crate::pipeline::{ArticleDigest, DigestOutcome};
use std::fmt::Write;

/// Render one feed item, numbered from 1.
pub fn render_digest(index: usize, digest: &ArticleDigest) -> String {
    let item = &digest.item;
    let mut md = String::new();

    writeln!(md, "### ({}) {}\n", index, item.title).unwrap();

    match &digest.outcome {
        DigestOutcome::NoContent { .. } => {
            writeln!(md, "> Couldn't extract article content\n").unwrap();
        }
        DigestOutcome::Summarized {
            model_summary,
            basic_summary,
            ..
        } => {
            match model_summary {
                Ok(summary) => {
                    writeln!(md, "**AI Summary**\n\n{}\n", summary).unwrap();
                }
                Err(e) => {
                    writeln!(md, "> AI summary failed: {}\n", e).unwrap();
                }
            }
            if let Some(basic) = basic_summary {
                writeln!(md, "**Basic Summary**\n\n{}\n", basic).unwrap();
            }
        }
    }

    let source = if item.source.is_empty() {
        "source"
    } else {
        item.source.as_str()
    };
    writeln!(md, "[Read full article at {}...]({})\n", source, item.link).unwrap();
    match item.published_at_utc() {
        Some(at) => writeln!(md, "Published: {}\n", at.format("%Y-%m-%d %H:%M UTC")).unwrap(),
        None if !item.published_at.is_empty() => {
            writeln!(md, "Published: {}\n", item.published_at).unwrap()
        }
        None => {}
    }
    md.push_str("---\n");
    md
}

/// Render a summary produced from pasted text.
pub fn render_summary(summary: &str) -> String {
    format!("## AI Summary\n\n{}\n", summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsItem;

    fn item(source: &str) -> NewsItem {
        NewsItem {
            title: "Harbour bridge approved".into(),
            link: "https://news.example.com/bridge".into(),
            source: source.into(),
            published_at: "Mon, 19 Oct 2026 08:30:00 GMT".into(),
        }
    }

    #[test]
    fn test_render_summarized_digest() {
        let digest = ArticleDigest {
            item: item("Example News"),
            outcome: DigestOutcome::Summarized {
                article: "Body".into(),
                model_summary: Ok("Council approves bridge.".into()),
                basic_summary: Some("The council approved the bridge on Tuesday.".into()),
            },
        };
        let md = render_digest(2, &digest);

        assert!(md.starts_with("### (2) Harbour bridge approved"));
        assert!(md.contains("**AI Summary**\n\nCouncil approves bridge."));
        assert!(md.contains("**Basic Summary**"));
        assert!(md.contains("[Read full article at Example News...](https://news.example.com/bridge)"));
        assert!(md.contains("Published: 2026-10-19 08:30 UTC"));
    }

    #[test]
    fn test_render_no_content_and_model_failure() {
        let digest = ArticleDigest {
            item: item(""),
            outcome: DigestOutcome::NoContent {
                reason: "paragraphs: too short".into(),
            },
        };
        let md = render_digest(1, &digest);
        assert!(md.contains("Couldn't extract article content"));
        assert!(md.contains("[Read full article at source...]"));

        let digest = ArticleDigest {
            item: item("Example News"),
            outcome: DigestOutcome::Summarized {
                article: "Body".into(),
                model_summary: Err("Model inference failed: timeout".into()),
                basic_summary: None,
            },
        };
        let md = render_digest(1, &digest);
        assert!(md.contains("> AI summary failed: Model inference failed: timeout"));
        assert!(!md.contains("Basic Summary"));
    }
}
