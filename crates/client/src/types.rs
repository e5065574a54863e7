//! Wire types for the chat service API.

use serde::Deserialize;

/// Title reported when a thread has no usable name field.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Snapshot of a thread as returned by the state endpoint.
///
/// The service is inconsistent about which field carries the display name,
/// so both spellings are kept and resolved through [`display_name`](Self::display_name).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadInfo {
    /// Display name, newer API shape.
    #[serde(default)]
    pub name: Option<String>,
    /// Display name, older API shape.
    #[serde(default, rename = "threadName")]
    pub thread_name: Option<String>,
    /// Number of participants, informational only.
    #[serde(default, rename = "participantCount")]
    pub participant_count: Option<u32>,
}

impl ThreadInfo {
    /// The thread's display name, falling back through the alternate field
    /// and then the [`UNKNOWN_TITLE`] sentinel.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.thread_name.as_deref())
            .unwrap_or(UNKNOWN_TITLE)
    }
}

/// One item from the notification stream.
///
/// The shape mirrors what the service actually sends: a generic `type` tag,
/// a free-form `logMessageType` label for admin events, and a thread id that
/// may appear directly on the item or nested in `logMessageData` under two
/// alternate key spellings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamItem {
    /// Generic item category, e.g. `"message"` or `"event"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Sub-type label for admin events, e.g. `"log:thread-name"`.
    #[serde(default, rename = "logMessageType")]
    pub log_message_type: Option<String>,
    /// Affected thread id, direct field.
    #[serde(default, rename = "threadID")]
    pub thread_id: Option<String>,
    /// Secondary payload that may also carry the thread id.
    #[serde(default, rename = "logMessageData")]
    pub log_message_data: Option<LogMessageData>,
}

/// Secondary event payload. Only the thread id spellings are of interest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogMessageData {
    #[serde(default, rename = "threadID")]
    pub thread_id: Option<String>,
    #[serde(default, rename = "threadId")]
    pub thread_id_alt: Option<String>,
}

impl StreamItem {
    /// The affected thread id, trying the direct field first and then the
    /// nested payload's two spellings.
    pub fn affected_thread_id(&self) -> Option<&str> {
        self.thread_id
            .as_deref()
            .or_else(|| {
                self.log_message_data
                    .as_ref()
                    .and_then(|d| d.thread_id.as_deref())
            })
            .or_else(|| {
                self.log_message_data
                    .as_ref()
                    .and_then(|d| d.thread_id_alt.as_deref())
            })
    }
}

/// Batch returned by the event long-poll endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventBatch {
    /// Cursor to pass on the next poll.
    #[serde(default)]
    pub cursor: u64,
    /// Items observed since the previous cursor.
    #[serde(default)]
    pub items: Vec<StreamItem>,
}
