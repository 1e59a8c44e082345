//! Third-party content fetcher with explicit deadlines.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use helio_core::defaults::{CONTENT_FETCH_TIMEOUT_SECS, IMAGE_FETCH_TIMEOUT_SECS};
use helio_core::{ContentFetcher, Error, Result};

/// HTTP content fetcher for the nearby-events and social feed APIs.
///
/// Every request carries its own deadline so a slow third party cannot
/// exhaust the inbound webhook request's budget.
pub struct HttpContentFetcher {
    client: Client,
    json_timeout: Duration,
    image_timeout: Duration,
}

impl HttpContentFetcher {
    pub fn new() -> Self {
        Self::with_timeouts(
            Duration::from_secs(CONTENT_FETCH_TIMEOUT_SECS),
            Duration::from_secs(IMAGE_FETCH_TIMEOUT_SECS),
        )
    }

    pub fn with_timeouts(json_timeout: Duration, image_timeout: Duration) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            json_timeout,
            image_timeout,
        }
    }
}

impl Default for HttpContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .timeout(self.json_timeout)
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("GET {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamFetch(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("invalid JSON from {}: {}", url, e)))?;
        debug!(url, "Fetched upstream JSON");
        Ok(value)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(self.image_timeout)
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("GET {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamFetch(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("reading body from {} failed: {}", url, e)))?;
        debug!(url, bytes = bytes.len(), "Fetched image");
        Ok(bytes.to_vec())
    }
}
