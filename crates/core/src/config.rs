//! Desired-state configuration shared by all components.

use std::time::Duration;

/// Poll interval used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The desired state: which thread is locked, and to what title.
///
/// Built once at startup and injected into each component as an
/// `Arc<LockConfig>`; never mutated for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct LockConfig {
    /// Identifier of the managed thread.
    pub thread_id: String,
    /// Title the thread is locked to.
    pub desired_title: String,
    /// Interval between drift checks while the title is in sync.
    pub poll_interval: Duration,
}

impl LockConfig {
    /// Create a config with the default poll interval.
    pub fn new(thread_id: impl Into<String>, desired_title: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            desired_title: desired_title.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the in-sync poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
