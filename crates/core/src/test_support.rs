//! Scripted fake session shared by the corrector and watcher tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;

use chatlock_client::{ChatSession, ClientError, StreamItem, ThreadInfo};

type StreamResult = Result<StreamItem, ClientError>;

/// Fake [`ChatSession`] that serves scripted fetch outcomes and records
/// every write with its (virtual) timestamp.
pub struct FakeSession {
    /// Scripted fetch outcomes, drained front to back; once empty, a thread
    /// named `default_title` is served so loops keep running quietly.
    fetches: Mutex<VecDeque<Result<ThreadInfo, ClientError>>>,
    default_title: String,
    fetch_times: Mutex<Vec<Instant>>,
    writes: Mutex<Vec<(String, String, Instant)>>,
    write_fails: Mutex<u32>,
    stream: Mutex<Option<mpsc::Receiver<StreamResult>>>,
}

impl FakeSession {
    pub fn new(default_title: &str) -> Self {
        Self {
            fetches: Mutex::new(VecDeque::new()),
            default_title: default_title.to_string(),
            fetch_times: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            write_fails: Mutex::new(0),
            stream: Mutex::new(None),
        }
    }

    /// Attach the receiver handed out by [`ChatSession::subscribe`].
    pub fn with_stream(self, rx: mpsc::Receiver<StreamResult>) -> Self {
        *self.stream.lock().unwrap() = Some(rx);
        self
    }

    /// Queue one scripted fetch outcome.
    pub fn push_fetch(&self, result: Result<ThreadInfo, ClientError>) {
        self.fetches.lock().unwrap().push_back(result);
    }

    /// Make the next `n` writes fail with an API error.
    pub fn fail_next_writes(&self, n: u32) {
        *self.write_fails.lock().unwrap() = n;
    }

    pub fn titled(title: &str) -> ThreadInfo {
        ThreadInfo {
            name: Some(title.to_string()),
            ..ThreadInfo::default()
        }
    }

    pub fn api_error() -> ClientError {
        ClientError::api(500, "scripted failure")
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_times.lock().unwrap().len()
    }

    pub fn writes(&self) -> Vec<(String, String, Instant)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn fetch_times(&self) -> Vec<Instant> {
        self.fetch_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatSession for FakeSession {
    async fn fetch_thread(&self, _thread_id: &str) -> Result<ThreadInfo, ClientError> {
        self.fetch_times.lock().unwrap().push(Instant::now());
        if let Some(result) = self.fetches.lock().unwrap().pop_front() {
            return result;
        }
        Ok(Self::titled(&self.default_title))
    }

    async fn set_thread_title(&self, title: &str, thread_id: &str) -> Result<(), ClientError> {
        self.writes
            .lock()
            .unwrap()
            .push((title.to_string(), thread_id.to_string(), Instant::now()));
        let mut fails = self.write_fails.lock().unwrap();
        if *fails > 0 {
            *fails -= 1;
            return Err(Self::api_error());
        }
        Ok(())
    }

    fn subscribe(&self) -> mpsc::Receiver<StreamResult> {
        self.stream
            .lock()
            .unwrap()
            .take()
            .expect("FakeSession stream already subscribed or never attached")
    }
}
