//! Service error types.

use thiserror::Error;

/// Errors that can occur when talking to the Document Analysis Service.
///
/// The session controller folds every variant into a single user-visible
/// failure kind per call; the detail here is for logs.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// `error`/`detail` field of a JSON body, or the raw body.
        message: String,
    },

    /// The configured endpoint could not be used to build a client.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
