use std::process::Stdio;

use tracing::{error, info, warn};

use super::launcher::{JobHandle, RecordingJob, RecordingLauncher};
use crate::monitor::DEFAULT_YT_DLP;
use crate::utils::process::{log_tool_output, tool_command};
use crate::{Error, Result};

/// Records live videos by running yt-dlp inside the destination directory.
#[derive(Debug, Clone)]
pub struct YtDlpLauncher {
    binary: String,
    extra_args: Vec<String>,
}

impl YtDlpLauncher {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    /// Extra arguments placed before the video URL.
    pub fn with_extra_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn build_args(&self, job: &RecordingJob) -> Vec<String> {
        let mut args = vec!["--quiet".to_string(), "--no-progress".to_string()];
        args.extend(self.extra_args.iter().cloned());
        args.push(job.url.clone());
        args
    }
}

impl Default for YtDlpLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_YT_DLP)
    }
}

impl RecordingLauncher for YtDlpLauncher {
    fn launch(&self, job: RecordingJob) -> Result<JobHandle> {
        let mut child = tool_command(&self.binary)
            .args(self.build_args(&job))
            .current_dir(&job.destination)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::launch(format!(
                    "spawning {} in {}: {e}",
                    self.binary,
                    job.destination.display()
                ))
            })?;

        info!(
            title = %job.title,
            url = %job.url,
            destination = %job.destination.display(),
            pid = ?child.id(),
            "Start recording"
        );

        let binary = self.binary.clone();
        let url = job.url.clone();
        let task = tokio::spawn(async move {
            let stderr = child.stderr.take();
            let captured = async move {
                let mut buf = Vec::new();
                if let Some(mut stderr) = stderr {
                    use tokio::io::AsyncReadExt;
                    let _ = stderr.read_to_end(&mut buf).await;
                }
                buf
            };
            let (captured, status) = tokio::join!(captured, child.wait());
            log_tool_output(&binary, &captured);

            match status {
                Ok(status) if status.success() => {
                    info!(title = %job.title, url = %job.url, "Finished recording");
                }
                Ok(status) => {
                    warn!(title = %job.title, url = %job.url, code = ?status.code(), "Recording exited with an error");
                }
                Err(e) => {
                    error!(title = %job.title, url = %job.url, error = %e, "Error waiting for recording process");
                }
            }
        });

        Ok(JobHandle::new(url, task))
    }
}
