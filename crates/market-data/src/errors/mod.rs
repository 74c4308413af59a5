//! Error types for the market data crate.
//!
//! Fetch-level failures are returned as [`MarketDataError`]. Per-element parse
//! failures never surface here; they are reported through
//! [`ParseReport`](crate::parser::ParseReport) instead.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A transport-level failure while talking to the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// The response body is not valid in the provider's legacy encoding.
    #[error("Decode error: malformed {encoding} bytes in {context}")]
    Decode {
        /// Name of the source encoding
        encoding: &'static str,
        /// What was being decoded (usually the URL)
        context: String,
    },

    /// The count endpoint returned something other than a quoted integer.
    #[error("Invalid instrument count: {0:?}")]
    InvalidCount(String),

    /// JSON encode/decode failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file I/O failure while writing or reading a catalog.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be built from the given arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl MarketDataError {
    /// Returns true when the error came from the network or the remote server.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus { .. })
    }
}
