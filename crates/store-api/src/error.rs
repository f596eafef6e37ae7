//! # Store API Errors
//!
//! Every [`StoreApi`](crate::StoreApi) call returns [`StoreApiError`] on failure.
//! Callers decide the policy: the order-detail page substitutes zero values,
//! mutation handlers turn the error into an unsuccessful
//! [`ResponseStatus`](crate::model::ResponseStatus).

use thiserror::Error;

/// Errors that can occur while talking to the remote store API.
#[derive(Debug, Error)]
pub enum StoreApiError {
    /// The request never produced a response (connection refused, reset, ...).
    #[error("Store API transport error: {0}")]
    Transport(String),

    /// The call did not complete within the configured deadline.
    #[error("Store API call timed out")]
    Timeout,

    /// The store answered with a non-success status code.
    #[error("Store API returned status {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body was not the expected JSON document.
    #[error("Store API response could not be decoded: {0}")]
    Decode(String),

    /// The client was built with an unusable configuration.
    #[error("Store API configuration error: {0}")]
    Config(String),
}

impl From<String> for StoreApiError {
    fn from(msg: String) -> Self {
        StoreApiError::Transport(msg)
    }
}

impl From<reqwest::Error> for StoreApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StoreApiError::Timeout
        } else if e.is_decode() {
            StoreApiError::Decode(e.to_string())
        } else {
            StoreApiError::Transport(e.to_string())
        }
    }
}
