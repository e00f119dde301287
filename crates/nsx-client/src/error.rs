//! NSX client errors

use thiserror::Error;

/// Errors that can occur when interacting with the NSX manager API
#[derive(Debug, Error)]
pub enum NsxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Manager returned a status code outside the documented contract
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by the manager
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, expired session, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Object not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
