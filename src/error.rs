use std::error::Error as StdError;

use thiserror::Error;

/// Easysub's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Easysub's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// Budgets or options that would make the engine loop forever or divide by zero.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A subtitle-file block that could not be parsed. `block` is 1-based.
    #[error("malformed subtitle block {block}: {message}")]
    SubtitleParse { block: usize, message: String },

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn subtitle_parse(block: usize, message: impl Into<String>) -> Self {
        Self::SubtitleParse {
            block,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}
