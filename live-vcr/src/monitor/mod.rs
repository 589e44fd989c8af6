//! Live stream detection.
//!
//! The monitor is responsible for:
//! - Listing the current videos of every configured channel
//! - Classifying each not yet seen video (live, scheduled, ordinary)
//! - Launching a recording exactly once per live video
//! - Containing failures to the video or channel they occur in

mod classifier;
mod engine;
mod feed;
mod ytdlp;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::{ClassificationResult, ClassifyError, LiveClassifier, LiveStatus, video_url};
pub use engine::{CycleReport, PollCycleEngine, VideoFailure};
pub use feed::{ChannelFeedClient, VideoCandidate};
pub use ytdlp::{DEFAULT_YT_DLP, SCHEDULED_LIVE_MARKER, YtDlpClassifier};
