//! End-to-end poll cycles against in-memory collaborators.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use live_vcr::config::ConfigLoader;
use live_vcr::monitor::{
    ChannelFeedClient, ClassifyError, LiveClassifier, LiveStatus, PollCycleEngine, VideoCandidate,
    video_url,
};
use live_vcr::recorder::{JobHandle, RecordingJob, RecordingLauncher};
use live_vcr::scheduler::Scheduler;
use live_vcr::seen::{SEEN_FILE_NAME, SeenStore};
use live_vcr::{Error, Result};

/// Serves raw Atom documents through the real feed parser.
#[derive(Clone, Default)]
struct XmlFeed {
    documents: Arc<Mutex<HashMap<String, String>>>,
}

impl XmlFeed {
    fn with_document(self, channel_id: &str, xml: String) -> Self {
        self.documents
            .lock()
            .unwrap()
            .insert(channel_id.to_string(), xml);
        self
    }
}

#[async_trait]
impl ChannelFeedClient for XmlFeed {
    async fn fetch_candidates(&self, channel_id: &str) -> Result<Vec<VideoCandidate>> {
        let xml = self
            .documents
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .unwrap_or_default();
        let entries =
            channel_feed::parse_feed(&xml).map_err(|e| Error::feed_fetch(channel_id, e))?;
        Ok(entries.into_iter().map(VideoCandidate::from).collect())
    }
}

#[derive(Clone, Default)]
struct FixedClassifier {
    live: Vec<String>,
    scheduled: Vec<String>,
}

#[async_trait]
impl LiveClassifier for FixedClassifier {
    async fn classify(&self, video_id: &str) -> std::result::Result<LiveStatus, ClassifyError> {
        if self.live.iter().any(|id| id == video_id) {
            Ok(LiveStatus::Live {
                url: video_url(video_id),
            })
        } else if self.scheduled.iter().any(|id| id == video_id) {
            Err(ClassifyError::ScheduledLive {
                message: "This live event will begin in 3 hours.".to_string(),
            })
        } else {
            Ok(LiveStatus::NotLive)
        }
    }
}

#[derive(Clone, Default)]
struct RecordingLog {
    jobs: Arc<Mutex<Vec<RecordingJob>>>,
}

impl RecordingLauncher for RecordingLog {
    fn launch(&self, job: RecordingJob) -> Result<JobHandle> {
        let handle = JobHandle::untracked(job.url.clone());
        self.jobs.lock().unwrap().push(job);
        Ok(handle)
    }
}

fn atom(entries: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns="http://www.w3.org/2005/Atom">
  <title>Channel</title>"#,
    );
    for (id, title) in entries {
        xml.push_str(&format!(
            "<entry><yt:videoId>{id}</yt:videoId><title>{title}</title></entry>"
        ));
    }
    xml.push_str("</feed>");
    xml
}

fn write_config(dir: &Path, text: &str) -> ConfigLoader {
    let path = dir.join("config.yaml");
    std::fs::write(&path, text).unwrap();
    ConfigLoader::new(path, dir)
}

#[tokio::test]
async fn test_cycle_records_live_video_and_survives_restart() {
    let temp = TempDir::new().unwrap();
    let loader = write_config(temp.path(), "interval: 60\nchannels:\n  - id: abc\n    save_to: rec/abc\n");
    let config = loader.load().unwrap();

    let feed = XmlFeed::default().with_document("abc", atom(&[("v1", "Stream"), ("v2", "Clip")]));
    let classifier = FixedClassifier {
        live: vec!["v1".to_string()],
        ..Default::default()
    };
    let launcher = RecordingLog::default();

    let engine = PollCycleEngine::new(feed.clone(), classifier.clone(), launcher.clone());
    let mut scheduler = Scheduler::new(engine, loader, SeenStore::in_dir(temp.path()), config.clone());
    let report = scheduler.run_cycle().await;

    assert_eq!(report.dispatched, vec!["v1"]);
    assert_eq!(report.not_live, 1);
    let jobs = launcher.jobs.lock().unwrap().clone();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].url, "https://www.youtube.com/watch?v=v1");
    assert_eq!(jobs[0].destination, temp.path().join("rec/abc"));
    assert!(temp.path().join("rec/abc").is_dir());

    let persisted = std::fs::read_to_string(temp.path().join(SEEN_FILE_NAME)).unwrap();
    assert!(persisted.contains("v1"));
    assert!(persisted.contains("v2"));

    // A fresh process sees the same feed and must not record again
    let loader = write_config(temp.path(), "interval: 60\nchannels:\n  - id: abc\n    save_to: rec/abc\n");
    let engine = PollCycleEngine::new(feed, classifier, launcher.clone());
    let mut restarted = Scheduler::new(engine, loader, SeenStore::in_dir(temp.path()), config);
    assert_eq!(restarted.seen().len(), 2);

    let report = restarted.run_cycle().await;
    assert!(report.dispatched.is_empty());
    assert_eq!(report.already_seen, 2);
    assert_eq!(launcher.jobs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_scheduled_live_is_retried_every_cycle() {
    let temp = TempDir::new().unwrap();
    let loader = write_config(temp.path(), "interval: 60\nchannels:\n  - id: abc\n    save_to: rec\n");
    let config = loader.load().unwrap();

    let feed = XmlFeed::default().with_document("abc", atom(&[("soon", "Premiere")]));
    let classifier = FixedClassifier {
        scheduled: vec!["soon".to_string()],
        ..Default::default()
    };
    let engine = PollCycleEngine::new(feed, classifier, RecordingLog::default());
    let mut scheduler = Scheduler::new(engine, loader, SeenStore::in_dir(temp.path()), config);

    for _ in 0..2 {
        let report = scheduler.run_cycle().await;
        assert_eq!(report.scheduled, vec!["soon"]);
    }
    assert!(!scheduler.seen().contains("soon"));
    assert_eq!(scheduler.cycles(), 2);
}

#[tokio::test]
async fn test_malformed_feed_skips_only_that_channel() {
    let temp = TempDir::new().unwrap();
    let loader = write_config(
        temp.path(),
        "interval: 60\nchannels:\n  - id: broken\n    save_to: a\n  - id: good\n    save_to: b\n",
    );
    let config = loader.load().unwrap();

    let feed = XmlFeed::default()
        .with_document("broken", "<feed><entry><videoId>x</entry></feed>".to_string())
        .with_document("good", atom(&[("v9", "Upload")]));
    let engine = PollCycleEngine::new(feed, FixedClassifier::default(), RecordingLog::default());
    let mut scheduler = Scheduler::new(engine, loader, SeenStore::in_dir(temp.path()), config);

    let report = scheduler.run_cycle().await;
    assert_eq!(report.channels_polled, 2);
    assert_eq!(report.channel_failures.len(), 1);
    assert!(matches!(
        &report.channel_failures[0],
        Error::FeedFetch { channel_id, .. } if channel_id == "broken"
    ));
    assert!(scheduler.seen().contains("v9"));
}

#[test]
fn test_startup_config_errors_are_reported() {
    let temp = TempDir::new().unwrap();

    let missing = ConfigLoader::new(temp.path().join("absent.yaml"), temp.path());
    assert!(missing.load().unwrap_err().is_config());

    let bad_interval = write_config(temp.path(), "interval: soon\nchannels: []\n");
    assert!(bad_interval.load().unwrap_err().is_config());

    let not_a_list = write_config(temp.path(), "interval: 60\nchannels: abc\n");
    assert!(not_a_list.load().unwrap_err().is_config());
}
