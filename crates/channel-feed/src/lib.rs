//! Channel video feed client.
//!
//! Fetches the public Atom feed of a channel and turns it into an ordered
//! list of [`FeedEntry`] values (video id + title).

mod client;
mod error;
mod parser;

pub use client::{DEFAULT_FEED_URL, FEED_USER_AGENT, FeedClient};
pub use error::FeedError;
pub use parser::{FeedEntry, parse_feed};
