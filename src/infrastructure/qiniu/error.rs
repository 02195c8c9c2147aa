use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("qiniu returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("failed to decode qiniu response: {0}")]
    Decode(String),

    #[error("unknown region: {0}")]
    UnknownRegion(String),
}
