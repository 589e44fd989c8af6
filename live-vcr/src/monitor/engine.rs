//! One poll cycle across all configured channels.

use tracing::{debug, info, warn};

use super::classifier::{ClassificationResult, ClassifyError, LiveClassifier};
use super::feed::{ChannelFeedClient, VideoCandidate};
use crate::config::{AppConfig, ChannelConfig};
use crate::recorder::{RecordingJob, RecordingLauncher};
use crate::seen::SeenSet;
use crate::Error;

/// A video that could not be handled this cycle. It stays unseen.
#[derive(Debug)]
pub struct VideoFailure {
    pub channel_id: String,
    pub video_id: String,
    pub error: Error,
}

/// What happened during one cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub channels_polled: usize,
    /// Channels whose feed could not be fetched.
    pub channel_failures: Vec<Error>,
    /// Candidates skipped because they were already seen.
    pub already_seen: usize,
    /// Video ids a recording was launched for.
    pub dispatched: Vec<String>,
    /// Video ids found to be scheduled broadcasts.
    pub scheduled: Vec<String>,
    pub not_live: usize,
    pub failures: Vec<VideoFailure>,
}

impl CycleReport {
    /// Number of classifier calls made during the cycle.
    pub fn classified(&self) -> usize {
        self.dispatched.len() + self.scheduled.len() + self.not_live + self.failures.len()
    }
}

/// Detects new live videos and launches their recordings.
///
/// Channels and candidates are processed one at a time, in order. Only the
/// launch of a recording is concurrent with the loop.
pub struct PollCycleEngine<F, C, L> {
    feed: F,
    classifier: C,
    launcher: L,
}

impl<F, C, L> PollCycleEngine<F, C, L>
where
    F: ChannelFeedClient,
    C: LiveClassifier,
    L: RecordingLauncher,
{
    pub fn new(feed: F, classifier: C, launcher: L) -> Self {
        Self {
            feed,
            classifier,
            launcher,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run one cycle over `config.channels`, updating `seen` in memory.
    ///
    /// Persisting `seen` is up to the caller.
    pub async fn run_cycle(&self, config: &AppConfig, seen: &mut SeenSet) -> CycleReport {
        let mut report = CycleReport::default();

        for channel in &config.channels {
            report.channels_polled += 1;
            let candidates = match self.feed.fetch_candidates(&channel.id).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(channel_id = %channel.id, error = %e, "Skipping channel this cycle");
                    report.channel_failures.push(e);
                    continue;
                }
            };

            debug!(channel_id = %channel.id, count = candidates.len(), "Fetched candidates");
            for candidate in candidates {
                self.process_candidate(channel, candidate, seen, &mut report)
                    .await;
            }
        }

        report
    }

    async fn process_candidate(
        &self,
        channel: &ChannelConfig,
        candidate: VideoCandidate,
        seen: &mut SeenSet,
        report: &mut CycleReport,
    ) {
        if seen.contains(&candidate.id) {
            report.already_seen += 1;
            return;
        }

        let result: ClassificationResult = self.classifier.classify(&candidate.id).await.into();
        match result {
            ClassificationResult::Live(url) => {
                let job = RecordingJob::new(url, channel.destination.clone(), candidate.title);
                match self.launcher.launch(job) {
                    Ok(_handle) => {
                        seen.mark(candidate.id.clone());
                        report.dispatched.push(candidate.id);
                    }
                    Err(e) => {
                        warn!(channel_id = %channel.id, video_id = %candidate.id, error = %e, "Failed to launch recording");
                        report.failures.push(VideoFailure {
                            channel_id: channel.id.clone(),
                            video_id: candidate.id,
                            error: e,
                        });
                    }
                }
            }
            ClassificationResult::Scheduled(message) => {
                info!(channel_id = %channel.id, video_id = %candidate.id, "Found scheduled live: {message}");
                report.scheduled.push(candidate.id);
            }
            ClassificationResult::NotLive => {
                seen.mark(candidate.id);
                report.not_live += 1;
            }
            ClassificationResult::Failed(reason) => {
                warn!(channel_id = %channel.id, video_id = %candidate.id, "Classification failed: {reason}");
                report.failures.push(VideoFailure {
                    channel_id: channel.id.clone(),
                    video_id: candidate.id,
                    error: Error::Classification(ClassifyError::Failed { reason }),
                });
            }
        }
    }
}
