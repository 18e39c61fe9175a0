//! Outbound HTTP shared by the feed client and the extraction strategies.
//!
//! Every request carries the same browser identity and timeout. There are no
//! retries: a request either succeeds once or the caller falls back.

use crate::config::HttpConfig;
use crate::error::NewsError;
use reqwest::Client;
use tracing::{debug, instrument};

/// Build a client with the configured user agent and timeout.
///
/// # Errors
///
/// Returns [`NewsError::Config`] if the TLS backend or the user agent string
/// is rejected by `reqwest`.
pub fn build_client(config: &HttpConfig) -> Result<Client, NewsError> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .build()
        .map_err(|e| NewsError::Config(format!("failed to build HTTP client: {}", e)))
}

/// GET `url` and return the body as text.
///
/// # Arguments
///
/// * `client` - A client from [`build_client`], carrying the identity and timeout
/// * `url` - Absolute URL to fetch
///
/// # Errors
///
/// Returns [`NewsError::Network`] when the request fails, times out, or the
/// server answers with a non-success status.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, NewsError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(NewsError::Network(format!("{} returned status {}", url, status)));
    }
    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched body");
    Ok(body)
}
