//! Extractive "basic summary" shown alongside the model summary.
//!
//! Sentences are scored by how many of the article's most frequent keywords
//! they contain, with a bonus for words shared with the headline and for
//! appearing early. The best sentences are returned in article order.

use crate::config::BasicSummaryConfig;
use crate::utils::normalize_whitespace;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^.!?]+[.!?]+["')\]]*|[^.!?]+$"#).expect("valid sentence regex"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("valid word regex"));

const KEYWORD_COUNT: usize = 10;
const TITLE_WEIGHT: f64 = 1.5;
const POSITION_WEIGHT: f64 = 0.5;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "for", "from", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "more", "most", "my", "no", "not", "now", "of", "on",
    "one", "only", "or", "other", "our", "out", "over", "said", "says", "she", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "to", "too", "under", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "will", "with", "would", "you", "your",
];

static STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());

fn words(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !STOP_SET.contains(w.as_str()))
        .collect()
}

/// Most frequent non-stop words, each weighted by its share of all keyword hits.
fn keywords(text: &str) -> HashMap<String, f64> {
    let counts = words(text).into_iter().counts();
    let top = counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(KEYWORD_COUNT)
        .collect::<Vec<_>>();
    let total: usize = top.iter().map(|(_, n)| n).sum();
    top.into_iter()
        .map(|(w, n)| (w, n as f64 / total.max(1) as f64))
        .collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build an extractive summary of `text`.
///
/// Returns `None` when the article is too short to produce a summary longer
/// than `config.min_chars` characters.
pub fn basic_summary(title: &str, text: &str, config: &BasicSummaryConfig) -> Option<String> {
    let sentences = split_sentences(text);
    if sentences.is_empty() || config.sentences == 0 {
        return None;
    }

    let keywords = keywords(text);
    let title_words: HashSet<String> = words(title).into_iter().collect();
    let count = sentences.len() as f64;

    let chosen = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let sentence_words = words(sentence);
            let keyword_score: f64 = sentence_words
                .iter()
                .filter_map(|w| keywords.get(w))
                .sum();
            let title_score = if title_words.is_empty() {
                0.0
            } else {
                sentence_words.iter().filter(|w| title_words.contains(*w)).count() as f64
                    / title_words.len() as f64
            };
            let position_score = 1.0 - idx as f64 / count;
            let score = keyword_score + TITLE_WEIGHT * title_score + POSITION_WEIGHT * position_score;
            (idx, score)
        })
        .sorted_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(config.sentences)
        .map(|(idx, _)| idx)
        .sorted()
        .map(|idx| normalize_whitespace(sentences[idx]))
        .join(" ");

    (chosen.chars().count() > config.min_chars).then_some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "The city council approved the harbour bridge on Tuesday. \
        Lunch was served at noon. \
        Engineers expect the bridge to halve commuting times across the harbour. \
        A local bakery changed its opening hours. \
        Construction of the bridge begins in March and the council has set aside funds. \
        It rained briefly in the afternoon. \
        Critics of the bridge worry about harbour wildlife.";

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One. Two! Three? Trailing fragment");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Trailing fragment"]);
    }

    #[test]
    fn test_basic_summary_prefers_keyword_sentences_in_order() {
        let config = BasicSummaryConfig {
            sentences: 3,
            min_chars: 50,
        };
        let summary = basic_summary("Council approves harbour bridge", ARTICLE, &config).unwrap();

        assert!(summary.starts_with("The city council approved the harbour bridge"));
        assert!(!summary.contains("bakery"));
        assert!(!summary.contains("Lunch"));
        assert_eq!(split_sentences(&summary).len(), 3);
    }

    #[test]
    fn test_basic_summary_too_short_is_none() {
        let config = BasicSummaryConfig::default();
        assert_eq!(basic_summary("Title", "Tiny article.", &config), None);
        assert_eq!(basic_summary("Title", "", &config), None);
    }

    #[test]
    fn test_basic_summary_keeps_everything_when_article_is_short() {
        let config = BasicSummaryConfig {
            sentences: 5,
            min_chars: 10,
        };
        let text = "Rain is expected tomorrow. Temperatures will drop sharply overnight.";
        assert_eq!(basic_summary("Weather", text, &config).as_deref(), Some(text));
    }
}
