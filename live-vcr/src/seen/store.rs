use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::SeenSet;
use crate::utils::fs;
use crate::{Error, Result};

/// File name of the seen-state store inside the working directory.
pub const SEEN_FILE_NAME: &str = "videos_seen.yaml";

/// YAML file holding the [`SeenSet`] between runs.
#[derive(Debug, Clone)]
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SEEN_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted set.
    ///
    /// A missing, unreadable or malformed store yields an empty set.
    pub fn load(&self) -> SeenSet {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No seen-state store, starting empty");
                return SeenSet::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read seen-state store, starting empty");
                return SeenSet::new();
            }
        };

        // Any non-null marker counts; a null value reads as "not seen".
        match serde_yaml::from_str::<BTreeMap<String, serde_yaml::Value>>(&text) {
            Ok(map) => {
                let seen: SeenSet = map
                    .into_iter()
                    .filter(|(_, marker)| !marker.is_null())
                    .map(|(id, _)| id)
                    .collect();
                info!(path = %self.path.display(), count = seen.len(), "Loaded seen-state store");
                seen
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed seen-state store, starting empty");
                SeenSet::new()
            }
        }
    }

    /// Overwrite the persisted set with `seen`.
    pub fn persist(&self, seen: &SeenSet) -> Result<()> {
        let yaml = serde_yaml::to_string(seen)
            .map_err(|e| Error::persistence(format!("serializing seen set: {e}")))?;
        fs::write_atomic(&self.path, yaml.as_bytes())
            .map_err(|e| Error::persistence(e.to_string()))?;
        debug!(path = %self.path.display(), count = seen.len(), "Persisted seen-state store");
        Ok(())
    }
}
