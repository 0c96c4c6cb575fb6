//! Custom error types for rustxplore.
//!
//! All library functions return `Result<T, XploreError>` instead of using `unwrap()`.
//! Malformed search records are never an error: the normalizer absorbs them.

use thiserror::Error;

/// Main error type for rustxplore operations.
#[derive(Debug, Error)]
pub enum XploreError {
    /// Network/HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Search endpoint answered with a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error (bad output extension, endpoint, proxy)
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl XploreError {
    /// Whether this error came from talking to the search service.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. })
    }
}

/// Result type alias using `XploreError`
pub type Result<T> = std::result::Result<T, XploreError>;
