//! Cookie-credential loading for the chat session.
//!
//! The session is authenticated with a saved cookie jar (`appstate.json`),
//! an array of `{key, value, domain, path}` records exported from a logged-in
//! browser session. Loading happens once at startup; a missing or malformed
//! file is fatal.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ClientError, Result};

/// One saved cookie record.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieRecord {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// The saved session credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    cookies: Vec<CookieRecord>,
}

impl Credentials {
    /// Load credentials from a JSON cookie file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CredentialIo`] if the file cannot be read and
    /// [`ClientError::CredentialParse`] if it is not a valid cookie array.
    /// Both classify as [`RetryClass::Fatal`](crate::RetryClass::Fatal).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClientError::CredentialIo {
            path: path.display().to_string(),
            source,
        })?;
        let cookies: Vec<CookieRecord> =
            serde_json::from_str(&raw).map_err(|source| ClientError::CredentialParse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self { cookies })
    }

    /// Number of loaded cookie records.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the file contained no cookies at all.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Render the cookies as a `Cookie:` header value.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.key, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
