//! Append-only feedback log.
//!
//! Each rating becomes one CSV row:
//!
//! ```text
//! article,summary,feedback,timestamp
//! "First 500 characters…","Model summary…",1,2026-10-19 14:05:09.123456
//! ```
//!
//! The header is written only when the file is created. Afterwards rows are
//! appended and the file is never rewritten. One writer is assumed; there is
//! no locking.

use crate::config::FeedbackConfig;
use crate::error::NewsError;
use crate::models::{Rating, SummaryRecord};
use crate::utils::truncate_chars;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

/// Writes ratings of model summaries to the CSV feedback log.
///
/// The recorder holds only the log path and excerpt limit; the file is opened
/// per record, so a recorder can be cloned freely and never holds a handle
/// between prompts.
#[derive(Debug, Clone)]
pub struct FeedbackRecorder {
    path: PathBuf,
    excerpt_max_chars: usize,
}

impl FeedbackRecorder {
    pub fn new(path: impl Into<PathBuf>, excerpt_max_chars: usize) -> Self {
        Self {
            path: path.into(),
            excerpt_max_chars,
        }
    }

    pub fn from_config(config: &FeedbackConfig) -> Self {
        Self::new(config.log_path.clone(), config.excerpt_max_chars)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a rating to the log.
    ///
    /// # Arguments
    ///
    /// * `excerpt` - Article text; cut to the configured maximum characters
    /// * `summary` - The model summary being rated
    /// * `rating` - Stored as `1` (positive) or `0` (negative)
    ///
    /// # Returns
    ///
    /// `true` when the row was written. `false` if the log could not be
    /// created or appended to; the cause is logged at `error` level and never
    /// propagated.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display(), rating = ?rating))]
    pub fn record(&self, excerpt: &str, summary: &str, rating: Rating) -> bool {
        let record = SummaryRecord::new(
            truncate_chars(excerpt, self.excerpt_max_chars).to_string(),
            summary.to_string(),
            rating,
            Local::now(),
        );

        match self.append(&record) {
            Ok(created) => {
                info!(created, "Feedback saved successfully");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to save feedback");
                false
            }
        }
    }

    /// Write `record`, creating the log with a header row if needed.
    ///
    /// Returns whether the file was created by this call.
    fn append(&self, record: &SummaryRecord) -> Result<bool, NewsError> {
        let created = !self.path.exists();
        if created {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(created)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(created)
    }
}
