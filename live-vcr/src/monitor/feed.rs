use async_trait::async_trait;
use channel_feed::{FeedClient, FeedEntry};

use crate::{Error, Result};

/// A video listed in a channel feed during one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCandidate {
    pub id: String,
    pub title: String,
}

impl VideoCandidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl From<FeedEntry> for VideoCandidate {
    fn from(entry: FeedEntry) -> Self {
        Self {
            id: entry.video_id,
            title: entry.title,
        }
    }
}

/// Lists the current videos of a channel, in feed order.
#[async_trait]
pub trait ChannelFeedClient: Send + Sync {
    async fn fetch_candidates(&self, channel_id: &str) -> Result<Vec<VideoCandidate>>;
}

#[async_trait]
impl ChannelFeedClient for FeedClient {
    async fn fetch_candidates(&self, channel_id: &str) -> Result<Vec<VideoCandidate>> {
        let entries = self
            .fetch(channel_id)
            .await
            .map_err(|e| Error::feed_fetch(channel_id, e))?;
        Ok(entries.into_iter().map(VideoCandidate::from).collect())
    }
}
