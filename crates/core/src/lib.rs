//! Chatlock Core - the title reconciliation loop.
//!
//! Holds one invariant against the chat service: the managed thread's
//! display title equals the configured value. Drift is detected on two
//! independent paths and corrected through a single shared write path:
//!
//! - [`EventWatcher`]: reacts to title-change notifications within a short
//!   settle delay.
//! - [`PollWatcher`]: periodically re-reads the thread state as the safety
//!   net for notifications the event path misses.
//! - [`Corrector`]: one unconditional write of the desired title per call.
//!
//! Both watchers are idempotent writers of the same constant value, so
//! duplicate or out-of-order corrections converge to the same end state; no
//! mutual exclusion is attempted.

mod classify;
mod config;
mod corrector;
mod watcher;

pub use classify::is_title_change_label;
pub use config::{LockConfig, DEFAULT_POLL_INTERVAL};
pub use corrector::Corrector;
pub use watcher::{EventWatcher, PollHandle, PollWatcher};

#[cfg(test)]
pub(crate) mod test_support;
