//! Live status classification of individual videos.

use async_trait::async_trait;
use thiserror::Error;

/// Watch page URL of a video.
pub fn video_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// What the classifier found out about a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveStatus {
    /// Broadcasting right now; `url` is what the recorder should capture.
    Live { url: String },
    /// Ordinary upload or finished broadcast.
    NotLive,
}

/// Classification failures.
///
/// A scheduled broadcast is reported as an error by the extraction tooling,
/// so it is surfaced here as its own variant rather than as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("scheduled live: {message}")]
    ScheduledLive { message: String },
    #[error("{reason}")]
    Failed { reason: String },
}

impl ClassifyError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Per-video outcome consumed by the poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    Live(String),
    Scheduled(String),
    NotLive,
    Failed(String),
}

impl From<Result<LiveStatus, ClassifyError>> for ClassificationResult {
    fn from(outcome: Result<LiveStatus, ClassifyError>) -> Self {
        match outcome {
            Ok(LiveStatus::Live { url }) => Self::Live(url),
            Ok(LiveStatus::NotLive) => Self::NotLive,
            Err(ClassifyError::ScheduledLive { message }) => Self::Scheduled(message),
            Err(ClassifyError::Failed { reason }) => Self::Failed(reason),
        }
    }
}

/// Decides whether a video is live.
#[async_trait]
pub trait LiveClassifier: Send + Sync {
    async fn classify(&self, video_id: &str) -> Result<LiveStatus, ClassifyError>;
}
