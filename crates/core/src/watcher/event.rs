//! Event-driven instant reset.
//!
//! Consumes the session's notification stream and resets the title as soon
//! as a title-change-like item for the managed thread arrives.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use chatlock_client::{ChatSession, StreamItem};

use crate::classify::is_title_change_label;
use crate::config::LockConfig;
use crate::corrector::Corrector;

/// Pause after a change notification before writing, so the service's own
/// state propagation has settled.
const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Watches the notification stream for title changes on the managed thread.
///
/// Runs for the lifetime of the process; there is no stop control. Transport
/// errors on the stream are logged and the subscription is assumed to
/// continue - reconnection is not attempted here.
pub struct EventWatcher {
    session: Arc<dyn ChatSession>,
    config: Arc<LockConfig>,
    corrector: Arc<Corrector>,
}

impl EventWatcher {
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

    /// Spawn the watcher onto the runtime.
    pub fn spawn(self) {
        tokio::spawn(self.run());
    }

    /// Consume the notification stream until the session is dropped.
    pub async fn run(self) {
        let mut rx = self.session.subscribe();
        info!(
            "event watcher started for thread {}",
            self.config.thread_id
        );

        while let Some(item) = rx.recv().await {
            match item {
                Ok(item) => self.handle(item).await,
                Err(e) => {
                    // Transport-level trouble; keep listening.
                    error!("notification stream error: {}", e);
                }
            }
        }

        warn!("notification stream closed; event watcher exiting");
    }

    async fn handle(&self, item: StreamItem) {
        // Only generic "event" items carrying a sub-type label are candidates.
        if item.kind.as_deref() != Some("event") {
            return;
        }
        let Some(label) = item.log_message_type.as_deref() else {
            return;
        };
        if !is_title_change_label(label) {
            return;
        }

        match item.affected_thread_id() {
            Some(id) if id == self.config.thread_id => {}
            other => {
                debug!("title change on unmanaged thread {:?}, ignoring", other);
                return;
            }
        }

        warn!(
            "title change event detected for thread {}, resetting",
            self.config.thread_id
        );
        sleep(SETTLE_DELAY).await;

        match self.corrector.correct().await {
            Ok(()) => info!("event-driven reset applied"),
            Err(e) => {
                // The poll watcher remains the fallback; no local retry.
                error!("event-driven reset failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeSession;
    use tokio::sync::mpsc;
    use tokio::time::{timeout, Instant};

    const MANAGED: &str = "1000";
    const TITLE: &str = "Locked Title";

    fn title_event(thread_id: &str) -> StreamItem {
        StreamItem {
            kind: Some("event".to_string()),
            log_message_type: Some("log:thread-name".to_string()),
            thread_id: Some(thread_id.to_string()),
            ..StreamItem::default()
        }
    }

    fn start_watcher(
        session: Arc<FakeSession>,
    ) -> Arc<FakeSession> {
        let config = Arc::new(LockConfig::new(MANAGED, TITLE));
        let corrector = Arc::new(Corrector::new(session.clone(), config.clone()));
        let watcher = EventWatcher::new(session.clone(), config, corrector);
        tokio::spawn(watcher.run());
        session
    }

    async fn wait_for_writes(session: &FakeSession, count: usize) {
        timeout(Duration::from_secs(30), async {
            while session.write_count() < count {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("expected write did not happen");
    }

    #[tokio::test(start_paused = true)]
    async fn test_recognized_event_resets_after_settle_delay() {
        let (tx, rx) = mpsc::channel(8);
        let session = start_watcher(Arc::new(FakeSession::new(TITLE).with_stream(rx)));

        let sent_at = Instant::now();
        tx.send(Ok(title_event(MANAGED))).await.unwrap();
        wait_for_writes(&session, 1).await;

        let writes = session.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, TITLE);
        assert_eq!(writes[0].1, MANAGED);
        let elapsed = writes[0].2.duration_since(sent_at);
        assert!(elapsed >= SETTLE_DELAY, "reset fired before settle delay");
        assert!(elapsed < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_for_other_thread_is_ignored() {
        let (tx, rx) = mpsc::channel(8);
        let session = start_watcher(Arc::new(FakeSession::new(TITLE).with_stream(rx)));

        tx.send(Ok(title_event("9999"))).await.unwrap();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(session.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nested_thread_id_is_recognized() {
        let (tx, rx) = mpsc::channel(8);
        let session = start_watcher(Arc::new(FakeSession::new(TITLE).with_stream(rx)));

        let item: StreamItem = serde_json_item(
            r#"{"type":"event","logMessageType":"log:thread-title","logMessageData":{"threadId":"1000"}}"#,
        );
        tx.send(Ok(item)).await.unwrap();
        wait_for_writes(&session, 1).await;
        assert_eq!(session.writes()[0].1, MANAGED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrelated_items_are_ignored() {
        let (tx, rx) = mpsc::channel(8);
        let session = start_watcher(Arc::new(FakeSession::new(TITLE).with_stream(rx)));

        // Wrong category, unrelated label, and a label-less event.
        tx.send(Ok(serde_json_item(r#"{"type":"message","threadID":"1000"}"#)))
            .await
            .unwrap();
        tx.send(Ok(serde_json_item(
            r#"{"type":"event","logMessageType":"log:unsubscribe","threadID":"1000"}"#,
        )))
        .await
        .unwrap();
        tx.send(Ok(serde_json_item(r#"{"type":"event","threadID":"1000"}"#)))
            .await
            .unwrap();

        sleep(Duration::from_secs(5)).await;
        assert_eq!(session.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_does_not_stop_watcher() {
        let (tx, rx) = mpsc::channel(8);
        let session = start_watcher(Arc::new(FakeSession::new(TITLE).with_stream(rx)));

        tx.send(Err(FakeSession::api_error())).await.unwrap();
        tx.send(Ok(title_event(MANAGED))).await.unwrap();

        wait_for_writes(&session, 1).await;
        assert_eq!(session.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failure_is_not_retried_locally() {
        let (tx, rx) = mpsc::channel(8);
        let session = Arc::new(FakeSession::new(TITLE).with_stream(rx));
        session.fail_next_writes(1);
        let session = start_watcher(session);

        tx.send(Ok(title_event(MANAGED))).await.unwrap();
        wait_for_writes(&session, 1).await;

        sleep(Duration::from_secs(60)).await;
        assert_eq!(session.write_count(), 1);
    }

    fn serde_json_item(raw: &str) -> StreamItem {
        serde_json::from_str(raw).expect("test item must parse")
    }
}
