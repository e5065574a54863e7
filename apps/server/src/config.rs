use std::{net::SocketAddr, path::PathBuf, time::Duration};

use chatlock_core::DEFAULT_POLL_INTERVAL;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub thread_id: String,
    pub desired_title: String,
    pub poll_interval: Duration,
    pub api_url: String,
    pub appstate_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .expect("Invalid PORT");
        let listen_addr = SocketAddr::from(([0, 0, 0, 0], port));
        let thread_id = std::env::var("CHATLOCK_THREAD_ID")
            .ok()
            .filter(|v| !v.is_empty())
            .expect("CHATLOCK_THREAD_ID must be set");
        let desired_title = std::env::var("CHATLOCK_TITLE")
            .ok()
            .filter(|v| !v.is_empty())
            .expect("CHATLOCK_TITLE must be set to a non-empty title");
        let poll_interval = std::env::var("CHATLOCK_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let api_url = std::env::var("CHATLOCK_API_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .expect("CHATLOCK_API_URL must be set");
        let appstate_path = std::env::var("CHATLOCK_APPSTATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("appstate.json"));
        Self {
            listen_addr,
            thread_id,
            desired_title,
            poll_interval,
            api_url,
            appstate_path,
        }
    }
}
