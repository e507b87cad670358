//! Portal HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, CONNECTION};
use tracing::{debug, warn};

use super::{BytesResponse, DisclosureFetcher, JsonResponse};
use crate::config::ScanConfig;
use crate::error::{FetchError, FetchResult};

/// Reqwest-backed fetcher with browser-like headers and fixed backoff.
pub struct HttpFetcher {
    client: reqwest::Client,
    retries: u32,
}

impl HttpFetcher {
    /// Build a client from the scan configuration.
    pub fn new(config: &ScanConfig) -> FetchResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, "application/json, text/plain, */*".parse().unwrap());
        headers.insert(CONNECTION, "keep-alive".parse().unwrap());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            retries: config.retries.max(1),
        })
    }
}

#[async_trait]
impl DisclosureFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> FetchResult<JsonResponse> {
        let mut last_status = None;
        for attempt in 1..=self.retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    last_status = Some(status);
                    if response.status().is_success() {
                        match response.json::<serde_json::Value>().await {
                            Ok(value) => return Ok(JsonResponse { value, status }),
                            Err(err) => warn!(url, attempt, %err, "json decode failed"),
                        }
                    } else {
                        debug!(url, attempt, status, "non-success status");
                    }
                }
                Err(err) => warn!(url, attempt, %err, "request failed"),
            }
            tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
        }
        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            last_status,
        })
    }

    async fn fetch_bytes(&self, url: &str) -> FetchResult<BytesResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(BytesResponse { body, status })
    }

    fn name(&self) -> &str {
        "http"
    }
}
