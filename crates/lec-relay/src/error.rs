//! Relay error types.

use thiserror::Error;

/// Errors that stop the relay itself. Problems with a single request are
/// answered with an HTTP status instead.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The listening socket could not be opened.
    #[error("failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    /// Accepting the next connection failed.
    #[error("receive error: {0}")]
    Recv(#[from] std::io::Error),

    /// The upstream HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
