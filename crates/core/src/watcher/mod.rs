//! Drift detection drivers.
//!
//! Two watchers run concurrently against the same session and share the
//! [`Corrector`](crate::Corrector) as their only write path. The event
//! watcher reacts fast to recognized notifications; the poll watcher is the
//! safety net for everything the notification heuristic misses. A failure
//! in one never halts the other.

mod event;
mod poll;

pub use event::EventWatcher;
pub use poll::{PollHandle, PollWatcher};
