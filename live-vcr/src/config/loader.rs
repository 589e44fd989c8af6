use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{AppConfig, ChannelConfig};
use crate::utils::fs;
use crate::{Error, Result};

/// On-disk shape of the configuration document.
#[derive(Debug, Deserialize)]
struct RawConfig {
    interval: Option<i64>,
    #[serde(default)]
    channels: Vec<RawChannel>,
}

/// Fields stay raw YAML; only string scalars pass [`string_field`].
#[derive(Debug, Deserialize)]
struct RawChannel {
    #[serde(default)]
    id: Option<serde_yaml::Value>,
    #[serde(default)]
    save_to: Option<serde_yaml::Value>,
}

fn string_field(value: Option<serde_yaml::Value>, field: &str) -> Result<String> {
    match value {
        Some(serde_yaml::Value::String(s)) => Ok(s),
        Some(other) => Err(Error::config(format!(
            "`channels[].{field}` must be a string, got {}",
            yaml_kind(&other)
        ))),
        None => Err(Error::config(format!("`channels[].{field}` is required"))),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a list",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

/// Parse and validate a configuration document.
///
/// Relative `save_to` paths are resolved against `base_dir`. Destination
/// directories are created when missing and probed for write access.
pub fn parse_config(text: &str, base_dir: &Path) -> Result<AppConfig> {
    let raw: RawConfig = serde_yaml::from_str(text)
        .map_err(|e| Error::config(format!("Cannot parse config: {e}")))?;

    let interval = match raw.interval {
        Some(secs) if secs > 0 => Duration::from_secs(secs as u64),
        _ => return Err(Error::config("`interval` must be a positive integer")),
    };

    let channels = raw
        .channels
        .into_iter()
        .map(|channel| validate_channel(channel, base_dir))
        .collect::<Result<Vec<_>>>()?;

    Ok(AppConfig { interval, channels })
}

fn validate_channel(raw: RawChannel, base_dir: &Path) -> Result<ChannelConfig> {
    let id = string_field(raw.id, "id")?;
    if id.trim().is_empty() {
        return Err(Error::config("`channels[].id` must be a non-empty string"));
    }
    let save_to = string_field(raw.save_to, "save_to")?;

    let destination = base_dir.join(&save_to);
    fs::ensure_dir_all_sync_with_op("creating destination", &destination)
        .and_then(|_| fs::probe_writable(&destination))
        .map_err(|e| {
            Error::config(format!(
                "`channels[].save_to` must be a writable directory path (channel {id}): {e}"
            ))
        })?;

    Ok(ChannelConfig {
        id,
        destination,
    })
}

/// Reads the configuration file on demand.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Load the configuration, failing on any read or validation error.
    pub fn load(&self) -> Result<AppConfig> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::config(format!("Cannot load {}: {e}", self.path.display()))
        })?;
        let config = parse_config(&text, &self.base_dir)?;
        debug!(
            path = %self.path.display(),
            channels = config.channels.len(),
            interval_secs = config.interval.as_secs(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load the configuration, falling back to `previous` on failure.
    pub fn reload(&self, previous: AppConfig) -> AppConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Keeping previous configuration"
                );
                previous
            }
        }
    }
}
