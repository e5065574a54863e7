//! HTTP implementation of [`ChatSession`].
//!
//! Thin wrapper over the chat service's REST API: thread state reads, title
//! writes, and a long-polled `/events` endpoint that feeds the notification
//! stream. No reconciliation logic lives here.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use tokio::sync::mpsc;

use crate::credentials::Credentials;
use crate::error::{ClientError, Result};
use crate::session::ChatSession;
use crate::types::{EventBatch, StreamItem, ThreadInfo};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Long-poll requests are held open by the server; allow them more time.
const EVENT_POLL_TIMEOUT_SECS: u64 = 90;

/// Pause between long-poll attempts after a transport error.
const EVENT_POLL_BACKOFF_SECS: u64 = 5;

/// Buffered stream items before the pump blocks on the consumer.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Session over the chat service's REST API.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: reqwest::Client,
    base_url: String,
    cookie_header: String,
}

impl HttpSession {
    /// Create a new session.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the chat API (e.g. "https://chat.example.com/api")
    /// * `credentials` - Cookie credentials loaded from the appstate file
    pub fn new(base_url: &str, credentials: &Credentials) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie_header: credentials.cookie_header(),
        }
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let cookie_value = HeaderValue::from_str(&self.cookie_header)
            .map_err(|_| ClientError::Auth("cookie credentials contain invalid characters".to_string()))?;
        headers.insert(COOKIE, cookie_value);
        Ok(headers)
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("API response ({}): {}", status, body);

        if !status.is_success() {
            return Err(ClientError::api(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn poll_events(&self, cursor: u64) -> Result<EventBatch> {
        let url = format!("{}/events?cursor={}", self.base_url, cursor);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .timeout(Duration::from_secs(EVENT_POLL_TIMEOUT_SECS))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Long-poll loop feeding the subscription channel.
    ///
    /// Transport errors are forwarded in-band and followed by a short pause
    /// so a dead service does not turn the loop into a busy spin. The loop
    /// ends only when the receiver is dropped.
    async fn event_pump(self, tx: mpsc::Sender<std::result::Result<StreamItem, ClientError>>) {
        let mut cursor: u64 = 0;
        loop {
            match self.poll_events(cursor).await {
                Ok(batch) => {
                    cursor = batch.cursor;
                    for item in batch.items {
                        if tx.send(Ok(item)).await.is_err() {
                            debug!("event subscriber dropped, stopping pump");
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("event poll failed: {}", e);
                    if tx.send(Err(e)).await.is_err() {
                        debug!("event subscriber dropped, stopping pump");
                        return;
                    }
                    tokio::time::sleep(Duration::from_secs(EVENT_POLL_BACKOFF_SECS)).await;
                }
            }
        }
    }
}

#[async_trait]
impl ChatSession for HttpSession {
    async fn fetch_thread(&self, thread_id: &str) -> Result<ThreadInfo> {
        let url = format!(
            "{}/threads/{}",
            self.base_url,
            urlencoding::encode(thread_id)
        );
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn set_thread_title(&self, title: &str, thread_id: &str) -> Result<()> {
        let url = format!(
            "{}/threads/{}/title",
            self.base_url,
            urlencoding::encode(thread_id)
        );
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::api(status.as_u16(), body));
        }
        Ok(())
    }

    fn subscribe(&self) -> mpsc::Receiver<std::result::Result<StreamItem, ClientError>> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let session = self.clone();
        tokio::spawn(session.event_pump(tx));
        rx
    }
}
