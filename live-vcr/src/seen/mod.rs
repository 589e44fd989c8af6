//! Durable record of already handled videos.
//!
//! A video id that is present in the [`SeenSet`] is never classified or
//! dispatched again, including after a restart.

mod store;

pub use store::{SEEN_FILE_NAME, SeenStore};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Set of handled video ids.
///
/// Stored as an id -> marker mapping. Presence of the key is what counts;
/// the boolean value is carried for compatibility with the file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet {
    entries: BTreeMap<String, bool>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `video_id` has been handled.
    pub fn contains(&self, video_id: &str) -> bool {
        self.entries.contains_key(video_id)
    }

    /// Mark `video_id` as handled. Returns `false` if it already was.
    pub fn mark(&mut self, video_id: impl Into<String>) -> bool {
        self.entries.insert(video_id.into(), true).is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.mark(id);
        }
        set
    }
}
