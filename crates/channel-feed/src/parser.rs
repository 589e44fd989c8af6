//! Atom feed parsing.
//!
//! Elements are matched by local name so the parser does not care whether the
//! feed binds `yt:` / `media:` prefixes or uses a default namespace.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::warn;

use crate::FeedError;

/// A single video listed in a channel feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub video_id: String,
    pub title: String,
}

/// Field of an `<entry>` whose text is currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    VideoId,
    Title,
}

#[derive(Debug, Default)]
struct PartialEntry {
    video_id: Option<String>,
    title: Option<String>,
}

/// Parse an Atom document into its entries, preserving document order.
///
/// Entries without a video id are skipped. A missing title becomes an empty
/// string. When an entry carries several `title` elements (e.g. the
/// `media:group` copy) the first one wins.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<PartialEntry> = None;
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"entry" => current = Some(PartialEntry::default()),
                b"videoId" if current.is_some() => capture = Some(Capture::VideoId),
                b"title" if current.is_some() => capture = Some(Capture::Title),
                _ => {}
            },
            Event::Text(t) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), capture) {
                    let text = t.unescape()?;
                    entry.set(field, &text);
                }
            }
            Event::CData(c) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), capture) {
                    let text = std::str::from_utf8(&c)
                        .map_err(|e| FeedError::InvalidEntry(format!("non utf-8 cdata: {e}")))?;
                    entry.set(field, text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(entry) = current.take() {
                        match entry.video_id {
                            Some(video_id) => entries.push(FeedEntry {
                                video_id,
                                title: entry.title.unwrap_or_default(),
                            }),
                            None => warn!("Skipping feed entry without a video id"),
                        }
                    }
                    capture = None;
                }
                b"videoId" | b"title" => capture = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

impl PartialEntry {
    fn set(&mut self, field: Capture, text: &str) {
        let slot = match field {
            Capture::VideoId => &mut self.video_id,
            Capture::Title => &mut self.title,
        };
        if slot.is_none() {
            *slot = Some(text.to_string());
        }
    }
}
