use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the signage library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A reload payload parsed as JSON but does not have the expected shape.
    #[error("malformed {feed} data: {reason}")]
    MalformedData { feed: &'static str, reason: String },

    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// Raised by a rendering backend, e.g. when a font cannot measure text.
    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    pub fn malformed(feed: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedData { feed, reason: reason.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
