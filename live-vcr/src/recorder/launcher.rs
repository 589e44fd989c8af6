use std::path::PathBuf;

use tokio::task::JoinHandle;

use crate::Result;

/// Value snapshot handed to a recording task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingJob {
    /// URL of the live video.
    pub url: String,
    /// Directory the recording is written to.
    pub destination: PathBuf,
    /// Video title, for logging.
    pub title: String,
}

impl RecordingJob {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            title: title.into(),
        }
    }
}

/// Handle to a launched recording.
///
/// Dropping it detaches the job; the recording keeps running.
#[derive(Debug)]
pub struct JobHandle {
    url: String,
    task: Option<JoinHandle<()>>,
}

impl JobHandle {
    pub fn new(url: impl Into<String>, task: JoinHandle<()>) -> Self {
        Self {
            url: url.into(),
            task: Some(task),
        }
    }

    /// Handle for a job whose execution is not backed by a local task.
    pub fn untracked(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            task: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the backing task has ended. Untracked jobs report `false`.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_some_and(JoinHandle::is_finished)
    }
}

/// Starts recordings without waiting for them.
pub trait RecordingLauncher: Send + Sync {
    /// Start `job` and return once it is running.
    ///
    /// Errors only describe the launch; what happens to the recording later
    /// is not reported back.
    fn launch(&self, job: RecordingJob) -> Result<JobHandle>;
}
