//! # Session Errors

use thiserror::Error;

/// Errors returned by [`SessionClient`](crate::SessionClient).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The actor's channel is closed; no request can be sent.
    #[error("Session actor closed")]
    ActorClosed,

    /// The actor dropped the reply channel before answering.
    #[error("Session actor dropped response channel")]
    ActorDropped,

    /// No stored session has this id.
    #[error("Session not found: {0}")]
    NotFound(String),
}
