//! Poll loop driving the [`PollCycleEngine`].

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, ConfigLoader};
use crate::monitor::{ChannelFeedClient, CycleReport, LiveClassifier, PollCycleEngine};
use crate::recorder::RecordingLauncher;
use crate::seen::{SeenSet, SeenStore};

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Running a cycle and persisting its result.
    Polling,
    /// Waiting for the configured interval.
    Sleeping,
}

/// Runs poll cycles forever, one interval apart.
///
/// Owns the active configuration and the seen set. The configuration is
/// re-read after every sleep; a failed reload keeps the previous one.
pub struct Scheduler<F, C, L> {
    engine: PollCycleEngine<F, C, L>,
    loader: ConfigLoader,
    store: SeenStore,
    config: AppConfig,
    seen: SeenSet,
    state: SchedulerState,
    cycles: u64,
}

impl<F, C, L> Scheduler<F, C, L>
where
    F: ChannelFeedClient,
    C: LiveClassifier,
    L: RecordingLauncher,
{
    /// Create a scheduler from an already loaded startup configuration.
    ///
    /// The seen set is read from `store`.
    pub fn new(
        engine: PollCycleEngine<F, C, L>,
        loader: ConfigLoader,
        store: SeenStore,
        config: AppConfig,
    ) -> Self {
        let seen = store.load();
        Self {
            engine,
            loader,
            store,
            config,
            seen,
            state: SchedulerState::Polling,
            cycles: 0,
        }
    }

    pub fn engine(&self) -> &PollCycleEngine<F, C, L> {
        &self.engine
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one cycle over all channels, then persist the seen set.
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.state = SchedulerState::Polling;
        info!(channels = self.config.channels.len(), "Checking for videos to record");

        let report = self.engine.run_cycle(&self.config, &mut self.seen).await;

        if let Err(e) = self.store.persist(&self.seen) {
            warn!(
                path = %self.store.path().display(),
                error = %e,
                "Failed to persist seen videos; in-memory state stays authoritative"
            );
        }

        self.cycles += 1;
        info!(
            cycle = self.cycles,
            dispatched = report.dispatched.len(),
            scheduled = report.scheduled.len(),
            not_live = report.not_live,
            failed_videos = report.failures.len(),
            failed_channels = report.channel_failures.len(),
            seen = self.seen.len(),
            "Cycle complete"
        );
        report
    }

    /// Poll until `cancel` fires.
    ///
    /// Cancellation is observed while sleeping; a running cycle is finished
    /// and persisted first. Launched recordings are not waited for.
    pub async fn run(&mut self, cancel: CancellationToken) {
        loop {
            self.run_cycle().await;

            self.state = SchedulerState::Sleeping;
            debug!(interval_secs = self.config.interval.as_secs(), "Sleeping until next cycle");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Scheduler shutting down");
                    break;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }

            self.config = self.loader.reload(self.config.clone());
        }
    }
}
