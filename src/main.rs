//! # innews
//!
//! A terminal news reader that pulls stories from Google News RSS feeds,
//! extracts the article text, and summarizes it with a pretrained
//! text-to-text model and a keyword-based extractive summarizer. Ratings of
//! the AI summaries are appended to a CSV log for later fine-tuning.
//!
//! ## Usage
//!
//! ```sh
//! innews top -n 5
//! innews category business
//! innews search "climate summit"
//! innews summarize --file article.txt
//! ```
//!
//! ## Architecture
//!
//! Every command runs to completion on a single thread:
//! 1. **Feed**: fetch and parse the RSS item list
//! 2. **Extraction**: structured parser first, paragraph scraping second
//! 3. **Summarization**: model summary plus basic summary
//! 4. **Feedback**: optional y/n rating appended to the feedback log

use clap::Parser;
use futures::StreamExt;
use std::error::Error;
use std::path::Path;
use std::pin::pin;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extract;
mod feedback;
mod feeds;
mod heuristic;
mod http;
mod models;
mod pipeline;
mod render;
mod session;
mod summarizer;
mod utils;

use cli::{Cli, Command};
use config::{AppConfig, load_config};
use extract::ContentExtractor;
use feedback::FeedbackRecorder;
use feeds::{Feed, FeedClient};
use models::PendingFeedback;
use pipeline::{DigestOutcome, digest_items};
use render::{render_digest, render_summary};
use session::Session;
use summarizer::{ModelHandle, ModelSummarizer, SamplingParams, Summarize};
use utils::upcase;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    // The model handle is built once and shared by every summarize call.
    let handle = ModelHandle::initialize(&config.summarizer)?;
    info!(model = handle.model(), "innews starting up");
    let summarizer = ModelSummarizer::new(handle, SamplingParams::from(&config.summarizer));

    let recorder = FeedbackRecorder::from_config(&config.feedback);
    debug!(path = %recorder.path().display(), "Feedback log");
    let mut session = Session::new(
        BufReader::new(tokio::io::stdin()),
        recorder,
        !args.no_feedback,
    );

    match args.command {
        Command::Summarize { file } => {
            summarize_text(file.as_deref(), &summarizer, &mut session).await;
        }
        Command::Top { count } => {
            println!("## Trending News\n");
            show_feed(&config, Feed::Top, count.value.into(), &summarizer, &mut session).await?;
        }
        Command::Category { topic, count } => {
            println!("## {} News\n", topic);
            show_feed(&config, Feed::Category(topic), count.value.into(), &summarizer, &mut session).await?;
        }
        Command::Search { query, count } => {
            if query.trim().is_empty() {
                warn!("Please enter a search term");
                return Ok(());
            }
            println!("## News about {}\n", upcase(query.trim()));
            show_feed(&config, Feed::Search(query), count.value.into(), &summarizer, &mut session).await?;
        }
    }

    if session.pending().is_some() {
        debug!("Last summary was left unrated");
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");
    Ok(())
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut AppConfig, args: &Cli) {
    if let Some(path) = &args.feedback_log {
        config.feedback.log_path = path.clone();
    }
    if let Some(url) = &args.model_url {
        config.summarizer.endpoint = url.clone();
    }
}

/// Summarize text from `file`, or pasted on stdin, and offer feedback.
async fn summarize_text<S, R>(file: Option<&Path>, summarizer: &S, session: &mut Session<R>)
where
    S: Summarize,
    R: AsyncBufRead + Unpin,
{
    let article = match file {
        Some(path) => match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Could not read article file");
                return;
            }
        },
        None => {
            println!("Paste your news article, then enter a line containing only \".\":");
            session.read_article().await
        }
    };

    if article.trim().is_empty() {
        warn!("Please enter a valid article.");
        return;
    }

    match summarizer.summarize(&article).await {
        Ok(summary) => {
            println!("{}", render_summary(&summary));
            session
                .offer_feedback(PendingFeedback {
                    excerpt: article,
                    summary,
                })
                .await;
        }
        Err(e) => error!(error = %e, "Summary generation failed"),
    }
}

/// Fetch `feed`, then digest, render and offer each of the first `quantity`
/// items for rating as soon as it is ready.
async fn show_feed<S, R>(
    config: &AppConfig,
    feed: Feed,
    quantity: usize,
    summarizer: &S,
    session: &mut Session<R>,
) -> Result<(), Box<dyn Error>>
where
    S: Summarize,
    R: AsyncBufRead + Unpin,
{
    let client = FeedClient::new(&config.http, config.feeds.clone())?;
    let extractor = ContentExtractor::from_config(config)?;

    let items = client.fetch_items(&feed).await;
    if items.is_empty() {
        warn!(%feed, "No news articles found");
        return Ok(());
    }

    let total = quantity.min(items.len());
    let mut digests = pin!(digest_items(&items, quantity, &extractor, summarizer, &config.basic_summary));
    let mut index = 0;
    let mut summarized = 0;
    info!(item = 1, total, "Processing article");
    while let Some(digest) = digests.next().await {
        index += 1;
        if matches!(digest.outcome, DigestOutcome::Summarized { .. }) {
            summarized += 1;
        }
        println!("{}", render_digest(index, &digest));
        if let Some(pending) = digest.pending_feedback() {
            session.offer_feedback(pending).await;
        }
        if index < total {
            info!(item = index + 1, total, "Processing article");
        }
    }
    info!(processed = index, summarized, no_content = index - summarized, "Finished digesting items");
    Ok(())
}
