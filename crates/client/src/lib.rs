//! Chatlock Client - session layer for the external chat service.
//!
//! This crate provides the credential loading, HTTP client, and notification
//! stream subscription used by the reconciler. Both the poll and event paths
//! go through the [`ChatSession`] trait so the reconciler can be tested
//! against fakes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chatlock_client::{Credentials, HttpSession, ChatSession};
//!
//! let credentials = Credentials::load("appstate.json")?;
//! let session = HttpSession::new("https://chat.example.com/api", credentials);
//! let info = session.fetch_thread("25225211533747620").await?;
//! ```

mod credentials;
mod error;
mod http;
mod session;
mod types;

pub use credentials::{CookieRecord, Credentials};
pub use error::{ClientError, Result, RetryClass};
pub use http::HttpSession;
pub use session::ChatSession;
pub use types::*;
