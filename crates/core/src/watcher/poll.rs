//! Polling fallback.
//!
//! Periodically re-reads the thread state and resets the title on drift.
//! This is the safety net for notifications the event watcher misses
//! (unrecognized shapes, dropped subscription items).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use chatlock_client::ChatSession;

use crate::config::LockConfig;
use crate::corrector::Corrector;

/// Wait after a failed state fetch before polling again.
const FETCH_ERROR_RETRY: Duration = Duration::from_secs(60);

/// Wait after a correction attempt before re-checking. Much shorter than
/// the normal interval so a detected drift is verified quickly.
const DRIFT_RECHECK: Duration = Duration::from_secs(5);

/// Handle returned by [`PollWatcher::spawn`].
///
/// `stop` takes effect at the top of the loop's next iteration; an
/// iteration already in flight is not cancelled.
#[derive(Clone, Debug)]
pub struct PollHandle {
    stopped: Arc<AtomicBool>,
}

impl PollHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Fixed-interval drift check with asymmetric rescheduling.
///
/// One iteration: fetch the thread state, compare the title, correct on
/// drift. The delay to the next iteration depends on what happened -
/// short after a correction attempt, long after a fetch error, the normal
/// interval otherwise.
pub struct PollWatcher {
    session: Arc<dyn ChatSession>,
    config: Arc<LockConfig>,
    corrector: Arc<Corrector>,
}

impl PollWatcher {
    pub fn new(
        session: Arc<dyn ChatSession>,
        config: Arc<LockConfig>,
        corrector: Arc<Corrector>,
    ) -> Self {
        Self {
            session,
            config,
            corrector,
        }
    }

    /// Spawn the poll loop onto the runtime and return its stop handle.
    pub fn spawn(self) -> PollHandle {
        let handle = PollHandle {
            stopped: Arc::new(AtomicBool::new(false)),
        };
        let loop_handle = handle.clone();
        tokio::spawn(self.run(loop_handle));
        handle
    }

    /// Run the poll loop until the handle is stopped.
    pub async fn run(self, handle: PollHandle) {
        info!(
            "poll watcher started for thread {} (interval {:?})",
            self.config.thread_id, self.config.poll_interval
        );

        loop {
            if handle.is_stopped() {
                info!("poll watcher stopped");
                return;
            }
            let next_delay = self.tick().await;
            sleep(next_delay).await;
        }
    }

    /// One fetch/compare/correct iteration; returns the delay to the next.
    async fn tick(&self) -> Duration {
        let info = match self.session.fetch_thread(&self.config.thread_id).await {
            Ok(info) => info,
            Err(e) => {
                error!("poll: fetching thread state failed: {}", e);
                return FETCH_ERROR_RETRY;
            }
        };

        let current = info.display_name();
        if current == self.config.desired_title {
            return self.config.poll_interval;
        }

        warn!(
            "poll: thread title drifted to {:?}, resetting",
            current
        );
        if let Err(e) = self.corrector.correct().await {
            // Recheck on the short delay either way.
            error!("poll: reset failed: {}", e);
        }
        DRIFT_RECHECK
    }
}
