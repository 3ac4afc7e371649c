use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::effect::FetchRequest;
use crate::error::FetchError;
use crate::state::StoryPayload;

#[derive(Debug, Clone, Copy)]
pub struct FetchConfig {
    pub request_timeout: Duration,
    pub max_retries: u8,
    pub retry_backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_retries: 1,
            retry_backoff_ms: 250,
        }
    }
}

impl FetchConfig {
    /// Delay before retry number `attempt`, growing linearly.
    pub fn backoff(&self, attempt: u8) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Fetches and decodes one story list, retrying transient failures.
pub async fn fetch_stories(
    client: &Client,
    base: &Url,
    request: &FetchRequest,
    config: &FetchConfig,
) -> Result<StoryPayload, FetchError> {
    let url = request.url(base)?;
    info!(%url, "fetching stories");

    let mut attempt: u8 = 0;
    loop {
        match fetch_once(client, &url, config.request_timeout).await {
            Ok(payload) => {
                debug!(%url, count = payload.len(), "stories decoded");
                return Ok(payload);
            }
            Err(err) if attempt < config.max_retries && is_transient(&err) => {
                attempt += 1;
                warn!(%url, error = %err, attempt, "fetch failed, retrying");
                tokio::time::sleep(config.backoff(attempt)).await;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn fetch_once(
    client: &Client,
    url: &Url,
    timeout: Duration,
) -> Result<StoryPayload, FetchError> {
    let response = client.get(url.clone()).timeout(timeout).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

// Decoding errors and client errors won't change on retry.
fn is_transient(err: &FetchError) -> bool {
    match err {
        FetchError::Network(_) => true,
        FetchError::Status { status, .. } => status.is_server_error(),
        FetchError::Decode(_) | FetchError::InvalidBase(_) => false,
    }
}
