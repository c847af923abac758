//! Completion errors

use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Failed to connect to the completion service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the completion service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API key missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Model not found or not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during completion
    #[error("Completion timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Streaming error
    #[error("Stream error: {0}")]
    StreamError(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout(30000)
        } else if err.is_connect() {
            CompletionError::ConnectionFailed(err.to_string())
        } else {
            CompletionError::RequestFailed(err.to_string())
        }
    }
}
