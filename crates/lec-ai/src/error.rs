//! Remote AI error types.

use thiserror::Error;

/// Errors that can occur while asking a remote model for content.
///
/// None of these are retried. The content service treats every variant as a
/// reason to fall back to local generation.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP transport error (connect failure, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The endpoint returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the endpoint asked us to wait.
        retry_after_secs: u64,
    },

    /// The completion envelope or the model's reply was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The completion carried no message content.
    #[error("model returned an empty reply")]
    EmptyResponse,

    /// The reply parsed as JSON but is not an object of the expected kind.
    #[error("unexpected reply shape: {0}")]
    Shape(String),

    /// Remote generation was requested without the settings it needs.
    #[error("remote AI not configured: {0}")]
    NotConfigured(String),
}
