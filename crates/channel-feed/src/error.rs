use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("invalid feed entry: {0}")]
    InvalidEntry(String),
}
