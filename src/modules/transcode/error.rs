use axum::http::StatusCode;
use thiserror::Error;

use crate::common::response::ApiError;
use crate::infrastructure::qiniu::error::EngineError;

#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Rejected before any engine call; the message goes back to the caller as is.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Transcoding engine unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl TranscodeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            TranscodeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TranscodeError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<EngineError> for TranscodeError {
    fn from(e: EngineError) -> Self {
        Self::UpstreamUnavailable(e.to_string())
    }
}

impl From<TranscodeError> for ApiError {
    fn from(e: TranscodeError) -> Self {
        let status = e.status_code();
        ApiError(e.to_string(), status)
    }
}
