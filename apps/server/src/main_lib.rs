use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use chatlock_client::{ChatSession, Credentials, HttpSession};
use chatlock_core::{Corrector, EventWatcher, LockConfig, PollHandle, PollWatcher};

use crate::config::Config;

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Load credentials and build the chat session.
///
/// A missing or malformed credential file is fatal: the error propagates to
/// `main` and the process exits before any watcher starts.
pub fn build_session(config: &Config) -> anyhow::Result<Arc<dyn ChatSession>> {
    let credentials = Credentials::load(&config.appstate_path)?;
    if credentials.is_empty() {
        tracing::warn!(
            "credential file {} contains no cookies; requests will likely be rejected",
            config.appstate_path.display()
        );
    }
    tracing::info!(
        "loaded {} credential cookies from {}",
        credentials.len(),
        config.appstate_path.display()
    );
    Ok(Arc::new(HttpSession::new(&config.api_url, &credentials)))
}

/// Start the event watcher and the polling fallback.
///
/// Returns the poll watcher's stop handle; the event watcher runs for the
/// process lifetime and has no stop control.
pub fn start_watchers(session: Arc<dyn ChatSession>, config: &Config) -> PollHandle {
    let lock = Arc::new(
        LockConfig::new(&config.thread_id, &config.desired_title)
            .with_poll_interval(config.poll_interval),
    );
    let corrector = Arc::new(Corrector::new(session.clone(), lock.clone()));

    EventWatcher::new(session.clone(), lock.clone(), corrector.clone()).spawn();
    PollWatcher::new(session, lock, corrector).spawn()
}
