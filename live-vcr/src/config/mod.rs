//! Monitor configuration.
//!
//! The configuration file is re-read before every poll cycle. A file that
//! fails to load or validate is rejected as a whole; callers keep the
//! previously loaded [`AppConfig`].

mod loader;

pub use loader::{ConfigLoader, parse_config};

use std::path::PathBuf;
use std::time::Duration;

/// A monitored channel and where its recordings go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Opaque channel identifier.
    pub id: String,
    /// Existing, writable directory for recordings of this channel.
    pub destination: PathBuf,
}

/// Validated configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Wait between the end of one poll cycle and the start of the next.
    pub interval: Duration,
    /// Channels in the order they are polled.
    pub channels: Vec<ChannelConfig>,
}
