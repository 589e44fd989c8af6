use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::{FeedEntry, FeedError, parse_feed};

/// Public feed endpoint; the channel id is passed as `channel_id`.
pub const DEFAULT_FEED_URL: &str = "https://www.youtube.com/feeds/videos.xml";

/// The feed endpoint serves fresher data to feed fetchers than to browsers.
pub const FEED_USER_AGENT: &str = "FeedFetcher-Google; (+http://www.google.com/feedfetcher.html)";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for channel video feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    base_url: String,
}

impl FeedClient {
    pub fn new() -> Result<Self, FeedError> {
        Self::with_base_url(DEFAULT_FEED_URL)
    }

    /// Create a client against a different feed endpoint (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(FEED_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn feed_request(&self, channel_id: &str) -> RequestBuilder {
        self.client
            .get(&self.base_url)
            .query(&[("channel_id", channel_id)])
    }

    /// Fetch and parse the feed of `channel_id`.
    pub async fn fetch(&self, channel_id: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let request = self.feed_request(channel_id).build()?;
        let url = request.url().to_string();
        debug!(channel_id, url = %url, "Fetching channel feed");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let entries = parse_feed(&body)?;
        debug!(channel_id, count = entries.len(), "Parsed channel feed");
        Ok(entries)
    }
}
