//! live-vcr library crate.
//!
//! Watches a set of channels for new live broadcasts and launches one
//! recording per broadcast. The binary in `main.rs` wires the yt-dlp and
//! feed adapters into the [`scheduler::Scheduler`].

pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod recorder;
pub mod scheduler;
pub mod seen;
pub mod utils;

pub use error::{Error, Result};
