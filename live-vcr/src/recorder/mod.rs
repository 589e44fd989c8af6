//! Recording job launch.
//!
//! A recording runs in its own task and child process. The poll loop only
//! sees whether the launch itself succeeded.

mod launcher;
mod ytdlp;

pub use launcher::{JobHandle, RecordingJob, RecordingLauncher};
pub use ytdlp::YtDlpLauncher;
