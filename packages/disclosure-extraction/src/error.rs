//! Typed errors for the fetch boundary.
//!
//! The heuristic core is made of total functions and never errors; only
//! the HTTP seam can fail, and those failures stay typed with `thiserror`.

use thiserror::Error;

/// Errors raised while talking to the disclosure portal.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// All attempts exhausted without a decodable payload
    #[error("retries exhausted for {url}")]
    RetriesExhausted {
        url: String,
        last_status: Option<u16>,
    },
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
