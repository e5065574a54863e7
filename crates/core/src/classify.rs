//! Notification label classification.

/// Whether a notification sub-type label looks like a thread title change.
///
/// The service's notification taxonomy is not fully specified and varies
/// between gateway versions, so this is a best-effort heuristic: a fixed set
/// of known labels plus substring checks. Unrecognized title-change labels
/// are a known false-negative risk; the poll watcher covers them.
pub fn is_title_change_label(label: &str) -> bool {
    matches!(
        label,
        "log:thread-name" | "log:thread-title" | "log:thread-name-change"
    ) || (label.contains("thread") && label.contains("name"))
        || (label.contains("thread") && label.contains("title"))
}
