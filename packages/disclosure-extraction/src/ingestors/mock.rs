//! Mock fetcher for tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::{BytesResponse, DisclosureFetcher, JsonResponse};
use crate::error::{FetchError, FetchResult};

/// Canned-response fetcher with call tracking.
///
/// URLs without a canned response answer like a dead endpoint
/// (`RetriesExhausted` with a 404).
#[derive(Default, Clone)]
pub struct MockFetcher {
    json: Arc<RwLock<HashMap<String, (Value, u16)>>>,
    bytes: Arc<RwLock<HashMap<String, (Vec<u8>, u16)>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `value` with the given status for `url`.
    pub fn add_json(&self, url: impl Into<String>, status: u16, value: Value) {
        self.json.write().unwrap().insert(url.into(), (value, status));
    }

    /// Serve raw bytes with the given status for `url`.
    pub fn add_bytes(&self, url: impl Into<String>, status: u16, body: Vec<u8>) {
        self.bytes.write().unwrap().insert(url.into(), (body, status));
    }

    /// Builder variant of [`add_json`](Self::add_json).
    pub fn with_json(self, url: impl Into<String>, status: u16, value: Value) -> Self {
        self.add_json(url, status, value);
        self
    }

    /// Builder variant of [`add_bytes`](Self::add_bytes).
    pub fn with_bytes(self, url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        self.add_bytes(url, status, body);
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl DisclosureFetcher for MockFetcher {
    async fn fetch_json(&self, url: &str) -> FetchResult<JsonResponse> {
        self.calls.write().unwrap().push(url.to_string());
        match self.json.read().unwrap().get(url) {
            Some((value, status)) => Ok(JsonResponse {
                value: value.clone(),
                status: *status,
            }),
            None => Err(FetchError::RetriesExhausted {
                url: url.to_string(),
                last_status: Some(404),
            }),
        }
    }

    async fn fetch_bytes(&self, url: &str) -> FetchResult<BytesResponse> {
        self.calls.write().unwrap().push(url.to_string());
        match self.bytes.read().unwrap().get(url) {
            Some((body, status)) => Ok(BytesResponse {
                body: body.clone(),
                status: *status,
            }),
            None => Err(FetchError::RetriesExhausted {
                url: url.to_string(),
                last_status: Some(404),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_serves_canned_json() {
        let mock = MockFetcher::new().with_json("http://x/api", 200, json!({"k": "v"}));
        let response = mock.fetch_json("http://x/api").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.value["k"], "v");
    }

    #[tokio::test]
    async fn test_mock_unknown_url_errors() {
        let mock = MockFetcher::new();
        assert!(mock.fetch_json("http://missing").await.is_err());
        assert!(mock.fetch_bytes("http://missing").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let mock = MockFetcher::new().with_json("http://a", 200, json!(null));
        let _ = mock.fetch_json("http://a").await;
        let _ = mock.fetch_bytes("http://b").await;
        assert_eq!(mock.calls(), vec!["http://a".to_string(), "http://b".to_string()]);
    }
}
