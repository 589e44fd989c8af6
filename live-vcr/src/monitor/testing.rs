//! In-memory collaborators for poll cycle tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{ChannelFeedClient, ClassifyError, LiveClassifier, LiveStatus, VideoCandidate};
use crate::config::{AppConfig, ChannelConfig};
use crate::recorder::{JobHandle, RecordingJob, RecordingLauncher};
use crate::{Error, Result};

pub fn channel(id: &str, destination: &str) -> ChannelConfig {
    ChannelConfig {
        id: id.to_string(),
        destination: PathBuf::from(destination),
    }
}

pub fn config(channels: Vec<ChannelConfig>) -> AppConfig {
    AppConfig {
        interval: Duration::from_secs(60),
        channels,
    }
}

/// Feed with fixed contents per channel. Channels without contents fail.
#[derive(Clone, Default)]
pub struct MockFeed {
    feeds: Arc<Mutex<HashMap<String, Vec<VideoCandidate>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(self, channel_id: &str, videos: &[(&str, &str)]) -> Self {
        self.set_channel(channel_id, videos);
        self
    }

    pub fn with_failing_channel(self, channel_id: &str) -> Self {
        self.feeds.lock().unwrap().remove(channel_id);
        self
    }

    pub fn set_channel(&self, channel_id: &str, videos: &[(&str, &str)]) {
        let candidates = videos
            .iter()
            .map(|(id, title)| VideoCandidate::new(*id, *title))
            .collect();
        self.feeds
            .lock()
            .unwrap()
            .insert(channel_id.to_string(), candidates);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelFeedClient for MockFeed {
    async fn fetch_candidates(&self, channel_id: &str) -> Result<Vec<VideoCandidate>> {
        self.calls.lock().unwrap().push(channel_id.to_string());
        self.feeds
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .ok_or_else(|| {
                Error::feed_fetch(
                    channel_id,
                    channel_feed::FeedError::Status {
                        status: 503,
                        url: format!("mock://{channel_id}"),
                    },
                )
            })
    }
}

/// Classifier with scripted outcomes. Unknown videos are not live.
#[derive(Clone, Default)]
pub struct MockClassifier {
    outcomes: Arc<Mutex<HashMap<String, std::result::Result<LiveStatus, ClassifyError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, video_id: &str, outcome: std::result::Result<LiveStatus, ClassifyError>) -> Self {
        self.set(video_id, outcome);
        self
    }

    pub fn set(&self, video_id: &str, outcome: std::result::Result<LiveStatus, ClassifyError>) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(video_id.to_string(), outcome);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LiveClassifier for MockClassifier {
    async fn classify(&self, video_id: &str) -> std::result::Result<LiveStatus, ClassifyError> {
        self.calls.lock().unwrap().push(video_id.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .get(video_id)
            .cloned()
            .unwrap_or(Ok(LiveStatus::NotLive))
    }
}

/// Launcher that only records the jobs it was given.
#[derive(Clone, Default)]
pub struct MockLauncher {
    jobs: Arc<Mutex<Vec<RecordingJob>>>,
    fail: bool,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn jobs(&self) -> Vec<RecordingJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl RecordingLauncher for MockLauncher {
    fn launch(&self, job: RecordingJob) -> Result<JobHandle> {
        if self.fail {
            return Err(Error::launch("mock launcher refuses"));
        }
        let handle = JobHandle::untracked(job.url.clone());
        self.jobs.lock().unwrap().push(job);
        Ok(handle)
    }
}
