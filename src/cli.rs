//! Command-line interface definitions for innews.
//!
//! Options can be given as flags or environment variables. Anything not
//! exposed here lives in the optional YAML config file.

use crate::config::MAX_NEWS_COUNT;
use crate::feeds::Topic;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the news reader.
///
/// # Examples
///
/// ```sh
/// # Summarize pasted text (finish with a line holding only ".")
/// innews summarize
///
/// # Five trending stories
/// innews top
///
/// # Technology section, ten stories, no feedback prompts
/// innews --no-feedback category technology --count 10
///
/// # Search
/// innews search "climate summit" -n 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "INNEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the feedback log location
    #[arg(long, env = "INNEWS_FEEDBACK_LOG")]
    pub feedback_log: Option<PathBuf>,

    /// Override the model server base URL (OpenAI-compatible, e.g. http://localhost:8080/v1)
    #[arg(long, env = "INNEWS_MODEL_URL")]
    pub model_url: Option<String>,

    /// Don't ask for feedback after each AI summary
    #[arg(long)]
    pub no_feedback: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Summarize an article read from a file or pasted on stdin
    Summarize {
        /// Read the article from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Trending top stories
    Top {
        #[command(flatten)]
        count: CountArg,
    },
    /// Stories from one topic section
    Category {
        #[arg(value_enum, ignore_case = true)]
        topic: Topic,
        #[command(flatten)]
        count: CountArg,
    },
    /// Stories matching a search term
    Search {
        query: String,
        #[command(flatten)]
        count: CountArg,
    },
}

#[derive(clap::Args, Debug, Clone, Copy, PartialEq)]
pub struct CountArg {
    /// Number of news items to show
    #[arg(
        short = 'n',
        long = "count",
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=MAX_NEWS_COUNT as i64)
    )]
    pub value: u8,
}
