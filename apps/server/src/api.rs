//! Liveness routes for external uptime checks.
//!
//! Not part of the reconciliation logic; deployment platforms and uptime
//! monitors probe these to keep the process alive and observed.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

async fn root() -> &'static str {
    "chatlock is alive"
}

async fn healthz() -> &'static str {
    "ok"
}

pub fn app_router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
}
