use std::io;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("please enter some text or select a file")]
    EmptyInput,
    #[error("an analysis request is already in flight")]
    Busy,
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    MalformedResponse(String),
    #[error("invariant violated: {0}")]
    Invariant(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}
