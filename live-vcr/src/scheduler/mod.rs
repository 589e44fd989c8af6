//! Scheduler module.
//!
//! Alternates between polling all channels and sleeping for the configured
//! interval, refreshing the configuration in between.

mod service;

pub use service::{Scheduler, SchedulerState};
