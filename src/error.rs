use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use session_actor::SessionError;
use thiserror::Error;
use tracing::error;

use crate::render::RenderError;

/// Failures that end a request with `500`.
///
/// Remote store failures are not here: handlers degrade those to empty pages
/// or failure redirects.
#[derive(Debug, Error)]
pub enum WebError {
    /// The session actor is gone.
    #[error("Session store unavailable: {0}")]
    Session(#[from] SessionError),

    /// The page template failed.
    #[error("Page could not be rendered: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
