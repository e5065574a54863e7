//! The shared write path: single-shot title correction.

use std::sync::Arc;

use tracing::{error, info};

use chatlock_client::{ChatSession, Result};

use crate::config::LockConfig;

/// Restores the desired title with exactly one write per call.
///
/// No internal retry and no read-before-write; the write is unconditional
/// and idempotent. Both watchers call this at their own cadence, and the
/// next scheduled detection pass is the retry mechanism after a failure.
pub struct Corrector {
    session: Arc<dyn ChatSession>,
    config: Arc<LockConfig>,
}

impl Corrector {
    pub fn new(session: Arc<dyn ChatSession>, config: Arc<LockConfig>) -> Self {
        Self { session, config }
    }

    /// Issue one write setting the thread title to the desired value.
    ///
    /// # Errors
    ///
    /// Returns the underlying client error. Failure is reported, never
    /// escalated; the caller decides the next step.
    pub async fn correct(&self) -> Result<()> {
        match self
            .session
            .set_thread_title(&self.config.desired_title, &self.config.thread_id)
            .await
        {
            Ok(()) => {
                info!(
                    "thread {} title set to {:?}",
                    self.config.thread_id, self.config.desired_title
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "failed to set title {:?} on thread {}: {}",
                    self.config.desired_title, self.config.thread_id, e
                );
                Err(e)
            }
        }
    }
}
