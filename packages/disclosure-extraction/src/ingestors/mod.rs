//! Fetch boundary: the portal client and its test double.
//!
//! The resolver only ever sees already-fetched content through the
//! [`DisclosureFetcher`] trait, which keeps every heuristic pure and lets
//! tests run against [`MockFetcher`].

mod http;
mod mock;

pub use http::HttpFetcher;
pub use mock::MockFetcher;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchResult;

/// A fetched JSON payload with the status that carried it.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    pub value: Value,
    pub status: u16,
}

/// A fetched binary body with its status.
#[derive(Debug, Clone)]
pub struct BytesResponse {
    pub body: Vec<u8>,
    pub status: u16,
}

/// The portal fetch seam.
#[async_trait]
pub trait DisclosureFetcher: Send + Sync {
    /// Fetch and decode a JSON endpoint, retrying per configuration.
    async fn fetch_json(&self, url: &str) -> FetchResult<JsonResponse>;

    /// Fetch a raw body (document candidates), single attempt.
    async fn fetch_bytes(&self, url: &str) -> FetchResult<BytesResponse>;

    /// Name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
