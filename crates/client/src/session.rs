//! Chat session trait definition.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{ClientError, Result};
use crate::types::{StreamItem, ThreadInfo};

/// A logged-in session against the chat service.
///
/// Implement this trait to plug in a different transport. The reconciler
/// only ever talks to the service through this trait, so tests substitute a
/// scripted fake.
///
/// All requests are independent; the service, not the caller, serializes
/// concurrent writes. Issuing requests from several tasks against one
/// session is expected usage.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Read the current state of a thread.
    async fn fetch_thread(&self, thread_id: &str) -> Result<ThreadInfo>;

    /// Set a thread's display title. One write per call, no internal retry;
    /// rescheduling after a failure is the caller's concern.
    async fn set_thread_title(&self, title: &str, thread_id: &str) -> Result<()>;

    /// Subscribe to the notification stream.
    ///
    /// Transport-level errors are delivered in-band as `Err` items; the
    /// subscription itself keeps running. The channel closing means the
    /// session was dropped.
    fn subscribe(&self) -> mpsc::Receiver<std::result::Result<StreamItem, ClientError>>;
}
