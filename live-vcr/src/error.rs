//! Application-wide error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed fetch error for channel {channel_id}: {source}")]
    FeedFetch {
        channel_id: String,
        #[source]
        source: channel_feed::FeedError,
    },

    #[error("Classification error: {0}")]
    Classification(#[from] crate::monitor::ClassifyError),

    #[error("Failed to launch recording: {0}")]
    Launch(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error while {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn launch(msg: impl Into<String>) -> Self {
        Self::Launch(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn feed_fetch(channel_id: impl Into<String>, source: channel_feed::FeedError) -> Self {
        Self::FeedFetch {
            channel_id: channel_id.into(),
            source,
        }
    }

    pub fn io_path(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error is a configuration problem.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
