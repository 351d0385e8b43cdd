//! Render coordination error types.

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("Source media missing: {0}")]
    SourceMissing(String),

    #[error("Media error: {0}")]
    Media(#[from] treel_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    pub fn render_failed(msg: impl Into<String>) -> Self {
        Self::RenderFailed(msg.into())
    }

    pub fn source_missing(msg: impl Into<String>) -> Self {
        Self::SourceMissing(msg.into())
    }

    /// Check if error is retryable.
    ///
    /// Encoder crashes and IO hiccups may succeed on retry; a missing
    /// source never will.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RenderError::Media(_) | RenderError::Io(_))
    }
}
