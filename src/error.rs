//! Error types for the Clarifai client.

use thiserror::Error;

/// Errors that can occur when talking to the Clarifai API.
#[derive(Error, Debug)]
pub enum ClarifaiError {
    /// HTTP request failed before a usable response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request body could not be encoded as JSON
    #[error("failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to parse a response from the API
    #[error("failed to parse response: {0}")]
    ParseError(String),

    /// The API rejected the access token on a call that was already retried
    #[error("access token rejected after re-authentication")]
    TokenInvalid,

    /// Rate limited by the API (HTTP 429)
    #[error("rate limited by the API")]
    Throttled,

    /// The API rejected the request payload or parameters (HTTP 400)
    #[error("request rejected by the API: {message}")]
    RequestRejected { message: String },

    /// The API reported a service-side failure (HTTP 500)
    #[error("Clarifai service error: {message}")]
    ServiceError { message: String },

    /// Any other status code
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// Invalid API root URL
    #[error("invalid API root URL: {0}")]
    InvalidUrl(String),

    /// IO error while reading an upload file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClarifaiError>;
