//! Error types for cache-backed fetches
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Fetch Error Enum ==
/// Unified error type for cache-backed fetches.
///
/// Cloneable so a single failure can be delivered to every caller
/// coalesced onto the same in-flight retrieval.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("Request rejected with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The retrieval exceeded the configured time limit
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    /// Failure reported by a custom fetcher
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

// == Reqwest Conversion ==
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache-backed fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
