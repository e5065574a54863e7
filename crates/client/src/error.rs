//! Error types and retry classification for the client crate.

use thiserror::Error;

/// Result type alias for chat session operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the chat service.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which tells the caller how to
/// schedule the next attempt.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The credential file could not be read.
    /// This is a fatal startup error - the process cannot establish a session.
    #[error("credential file {path}: {source}")]
    CredentialIo {
        /// Path of the credential file
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The credential file contents are not valid JSON.
    /// This is a fatal startup error - the process cannot establish a session.
    #[error("credential file {path} is malformed: {source}")]
    CredentialParse {
        /// Path of the credential file
        path: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The stored credentials cannot be used to build a request.
    #[error("authentication error: {0}")]
    Auth(String),

    /// A network error occurred while communicating with the chat service.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The chat service returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// A response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The notification stream ended and will not yield further items.
    #[error("notification stream closed")]
    StreamClosed,
}

impl ClientError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Fatal`]: abort startup, there is no session to retry with
    /// - [`RetryClass::Backoff`]: wait the long backoff before the next attempt
    /// - [`RetryClass::Reschedule`]: rely on the next scheduled attempt
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::CredentialIo { .. } | Self::CredentialParse { .. } | Self::Auth(_) => {
                RetryClass::Fatal
            }
            Self::Network(_) | Self::Api { .. } | Self::Json(_) => RetryClass::Backoff,
            Self::StreamClosed => RetryClass::Reschedule,
        }
    }
}

/// Classification for retry policy.
///
/// Used by the watchers to decide how to schedule the next attempt after an
/// error. The corrector itself never retries; scheduling is always owned by
/// the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Unrecoverable - terminate startup. Only credential errors map here.
    Fatal,

    /// Transient service trouble - wait the long backoff before retrying so a
    /// persistently failing service is not hammered.
    Backoff,

    /// No local action - the next scheduled detection pass covers it.
    Reschedule,
}
