//! Interactive session state: the summary awaiting a rating and the prompt
//! that collects it.

use crate::feedback::FeedbackRecorder;
use crate::models::{PendingFeedback, Rating};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

/// Interpret an answer to "Was this summary helpful?".
pub fn parse_rating(answer: &str) -> Option<Rating> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "like" | "+" | "👍" => Some(Rating::Positive),
        "n" | "no" | "dislike" | "-" | "👎" => Some(Rating::Negative),
        _ => None,
    }
}

/// One user's session. Owns the pending feedback pair; nothing is global.
pub struct Session<R> {
    input: Lines<R>,
    recorder: FeedbackRecorder,
    prompt_for_feedback: bool,
    pending: Option<PendingFeedback>,
}

impl<R: AsyncBufRead + Unpin> Session<R> {
    pub fn new(input: R, recorder: FeedbackRecorder, prompt_for_feedback: bool) -> Self {
        Self {
            input: input.lines(),
            recorder,
            prompt_for_feedback,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<&PendingFeedback> {
        self.pending.as_ref()
    }

    /// Read pasted article text up to a line holding only `.`, or end of input.
    pub async fn read_article(&mut self) -> String {
        let mut lines = Vec::new();
        loop {
            match self.input.next_line().await {
                Ok(Some(line)) if line.trim() == "." => break,
                Ok(Some(line)) => lines.push(line),
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed reading article input");
                    break;
                }
            }
        }
        lines.join("\n")
    }

    /// Make `pending` the current pair and ask the user to rate it.
    ///
    /// Returns `None` when no rating was given (prompting disabled, skipped,
    /// or end of input), otherwise whether the rating was saved. The pair is
    /// cleared only after a successful save.
    pub async fn offer_feedback(&mut self, pending: PendingFeedback) -> Option<bool> {
        self.pending = Some(pending);
        if !self.prompt_for_feedback {
            return None;
        }

        print!("Was this summary helpful? [y/n/s] ");
        std::io::stdout().flush().ok();

        let answer = match self.input.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed reading feedback answer");
                return None;
            }
        };

        let Some(rating) = parse_rating(&answer) else {
            debug!(%answer, "Feedback skipped");
            return None;
        };

        match rating {
            Rating::Positive => println!("Thank you for your feedback!"),
            Rating::Negative => println!(
                "We're sorry to hear that. Please let us know if you have any suggestions for improvement."
            ),
        }

        let pending = self.pending.as_ref()?;
        let saved = self.recorder.record(&pending.excerpt, &pending.summary, rating);
        if saved {
            self.pending = None;
        } else {
            println!("Failed to save feedback (see log for details)");
        }
        Some(saved)
    }
}
