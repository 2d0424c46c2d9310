// src/fetcher.rs

use crate::error::{ConfigError, Result};
use reqwest::header;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default timeout for a single fetch attempt.
pub const FETCH_TIMEOUT_SECS: u64 = 8;

/// Performs the single-shot, cache-busted GET against the resolved
/// endpoint. Not retried internally; retry is the caller's concern via
/// re-invocation on lifecycle events.
pub struct ConfigFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ConfigFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }

    /// Fetch the raw response body from `endpoint`.
    ///
    /// A Unix-seconds `t` query parameter defeats intermediate caches on
    /// top of the explicit no-cache headers. Connectivity failures,
    /// timeouts and non-2xx statuses all map to the transport taxonomy;
    /// the call has no side effects on failure.
    pub async fn fetch(&self, endpoint: &Url) -> Result<Vec<u8>> {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("t", &chrono::Utc::now().timestamp().to_string());

        debug!(url = %url, "Fetching remote configuration");

        let response = self
            .client
            .get(url)
            .header(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigError::transport(format!(
                "unexpected status {status} from {endpoint}"
            )));
        }

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        debug!(bytes = body.len(), "Remote configuration fetched");
        Ok(body.to_vec())
    }

    fn map_error(&self, err: reqwest::Error) -> ConfigError {
        if err.is_timeout() {
            ConfigError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            ConfigError::transport(err.to_string())
        }
    }
}
