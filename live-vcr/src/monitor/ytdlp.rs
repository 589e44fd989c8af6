//! yt-dlp backed [`LiveClassifier`].

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Deserialize;
use tracing::debug;

use super::classifier::{ClassifyError, LiveClassifier, LiveStatus, video_url};
use crate::utils::process::{log_tool_output, tool_command};

/// Default yt-dlp executable name, looked up on `PATH`.
pub const DEFAULT_YT_DLP: &str = "yt-dlp";

/// Phrase yt-dlp puts in the error of a not yet started broadcast.
pub const SCHEDULED_LIVE_MARKER: &str = "This live event will begin in";

/// Subset of the `--dump-single-json` document we care about.
#[derive(Debug, Default, Deserialize)]
struct VideoInfo {
    #[serde(default)]
    is_live: Option<bool>,
    #[serde(default)]
    live_status: Option<String>,
    #[serde(default)]
    release_timestamp: Option<i64>,
}

/// Classifies videos by asking yt-dlp for their metadata.
#[derive(Debug, Clone)]
pub struct YtDlpClassifier {
    binary: String,
}

impl YtDlpClassifier {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for YtDlpClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_YT_DLP)
    }
}

#[async_trait]
impl LiveClassifier for YtDlpClassifier {
    async fn classify(&self, video_id: &str) -> Result<LiveStatus, ClassifyError> {
        let url = video_url(video_id);
        let output = tool_command(&self.binary)
            .args([
                "--dump-single-json",
                "--skip-download",
                "--no-warnings",
                "--no-playlist",
            ])
            .arg(&url)
            .output()
            .await
            .map_err(|e| ClassifyError::failed(format!("failed to spawn {}: {e}", self.binary)))?;

        log_tool_output(&self.binary, &output.stderr);

        if !output.status.success() {
            return Err(failure_from_stderr(&String::from_utf8_lossy(&output.stderr)));
        }

        let info: VideoInfo = serde_json::from_slice(&output.stdout)
            .map_err(|e| ClassifyError::failed(format!("unparseable metadata for {url}: {e}")))?;
        debug!(video_id, live_status = ?info.live_status, is_live = ?info.is_live, "Classified video");
        status_from_info(&info, url)
    }
}

/// Map yt-dlp metadata to a live status.
fn status_from_info(info: &VideoInfo, url: String) -> Result<LiveStatus, ClassifyError> {
    match info.live_status.as_deref() {
        Some("is_live") => return Ok(LiveStatus::Live { url }),
        Some("is_upcoming") => {
            let message = match info.release_timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
                Some(start) => format!(
                    "{SCHEDULED_LIVE_MARKER} {}",
                    start.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %:z")
                ),
                None => "Scheduled live event has not started yet".to_string(),
            };
            return Err(ClassifyError::ScheduledLive { message });
        }
        _ => {}
    }

    if info.is_live == Some(true) {
        Ok(LiveStatus::Live { url })
    } else {
        Ok(LiveStatus::NotLive)
    }
}

/// Turn the stderr of a failed run into a typed error.
///
/// yt-dlp reports scheduled broadcasts only through its error text, so the
/// marker phrase is matched here and nowhere else.
fn failure_from_stderr(stderr: &str) -> ClassifyError {
    if let Some(start) = stderr.find(SCHEDULED_LIVE_MARKER) {
        let message = stderr[start..].lines().next().unwrap_or_default().trim();
        return ClassifyError::ScheduledLive {
            message: message.to_string(),
        };
    }

    let reason = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with("ERROR:"))
        .or_else(|| stderr.lines().rev().map(str::trim).find(|l| !l.is_empty()))
        .unwrap_or("yt-dlp exited with an error and no output");
    ClassifyError::failed(reason)
}
