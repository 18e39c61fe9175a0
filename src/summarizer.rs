//! Abstractive summarization through a pretrained text-to-text model.
//!
//! The model is served by an OpenAI-compatible completions endpoint (a local
//! text-generation server hosting the fine-tuned BART checkpoint, for
//! example). This module only knows the contract:
//!
//! ```text
//! summarize(text) -> summary
//! ```
//!
//! # Model handle
//!
//! [`ModelHandle`] is initialized once at startup and passed to
//! [`ModelSummarizer::new`]. It is read-only and needs no teardown.
//!
//! # Truncation
//!
//! Input longer than the model context is cut to the first
//! `max_input_tokens` whitespace-separated words before it is sent. This is
//! lossy: the tail of long articles never reaches the model.
//!
//! # Sampling
//!
//! Decoding samples with `top_k`, `top_p` and `temperature`, so two calls
//! with the same text usually return different summaries. Callers should only
//! rely on the summary being non-empty and bounded by `max_output_tokens`.

use crate::config::SummarizerConfig;
use crate::error::NewsError;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Anything that can turn article text into a summary.
pub trait Summarize {
    /// Summarize `text`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::ModelInference`] if the model could not produce a
    /// summary. Callers surface this as a warning and move on; nothing is retried.
    async fn summarize(&self, text: &str) -> Result<String, NewsError>;
}

/// Connection to the summarization model, created once per process.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    client: Client,
    completions_url: String,
    model: String,
    api_key: Option<String>,
}

impl ModelHandle {
    /// Build the handle from configuration.
    pub fn initialize(config: &SummarizerConfig) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NewsError::Config(format!("failed to build model client: {}", e)))?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| NewsError::Config(format!("invalid model endpoint {:?}: {}", config.endpoint, e)))?;
        let completions_url = format!("{}/completions", endpoint.as_str().trim_end_matches('/'));
        info!(url = %completions_url, model = %config.model, "Summarization model handle ready");
        Ok(Self {
            client,
            completions_url,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Decoding parameters for one summarization call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_input_tokens: usize,
    pub max_output_tokens: u32,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
}

impl From<&SummarizerConfig> for SamplingParams {
    fn from(config: &SummarizerConfig) -> Self {
        Self {
            max_input_tokens: config.max_input_tokens,
            max_output_tokens: config.max_output_tokens,
            top_k: config.top_k,
            top_p: config.top_p,
            temperature: config.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

/// [`Summarize`] implementation backed by the model server.
#[derive(Debug, Clone)]
pub struct ModelSummarizer {
    handle: ModelHandle,
    params: SamplingParams,
}

impl ModelSummarizer {
    pub fn new(handle: ModelHandle, params: SamplingParams) -> Self {
        Self { handle, params }
    }
}

impl Summarize for ModelSummarizer {
    #[instrument(level = "info", skip_all, fields(model = %self.handle.model))]
    async fn summarize(&self, text: &str) -> Result<String, NewsError> {
        let t0 = Instant::now();
        let prompt = truncate_to_context(text, self.params.max_input_tokens);
        if matches!(prompt, Cow::Owned(_)) {
            debug!(
                max_input_tokens = self.params.max_input_tokens,
                "Input exceeded model context; truncated"
            );
        }

        let body = CompletionRequest {
            model: &self.handle.model,
            prompt: &prompt,
            max_tokens: self.params.max_output_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
            top_k: self.params.top_k,
            n: 1,
        };

        let mut request = self.handle.client.post(&self.handle.completions_url).json(&body);
        if let Some(key) = &self.handle.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NewsError::ModelInference(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_for_log(&detail, 300), "Model server rejected request");
            return Err(NewsError::ModelInference(format!(
                "status {}: {}",
                status,
                truncate_for_log(&detail, 300)
            )));
        }

        let payload: CompletionResponse = response
            .json()
            .await
            .map_err(|e| NewsError::ModelInference(format!("unreadable completion: {}", e)))?;
        let summary = first_completion(payload)?;

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            chars = summary.chars().count(),
            "Generated summary"
        );
        Ok(summary)
    }
}

fn first_completion(payload: CompletionResponse) -> Result<String, NewsError> {
    let text = payload
        .choices
        .into_iter()
        .next()
        .map(|c| c.text.trim().to_string())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(NewsError::ModelInference("model returned an empty summary".into()));
    }
    Ok(text)
}

/// Keep at most `max_tokens` whitespace-separated words of `text`.
///
/// Borrowed when nothing was cut, owned (words re-joined with single spaces)
/// when the input was truncated.
pub fn truncate_to_context(text: &str, max_tokens: usize) -> Cow<'_, str> {
    let words = text.split_whitespace();
    if words.clone().nth(max_tokens).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(words.take(max_tokens).collect::<Vec<_>>().join(" "))
}
