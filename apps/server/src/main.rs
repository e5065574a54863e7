use anyhow::Context;

use chatlock_server::{api::app_router, build_session, config::Config, init_tracing, start_watchers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();

    let session = build_session(&config).context("failed to establish chat session")?;

    // Event-driven reset plus the polling fallback; the handle is held for
    // the lifetime of the process.
    let _poll_handle = start_watchers(session, &config);
    tracing::info!(
        "title lock active for thread {} ({:?})",
        config.thread_id,
        config.desired_title
    );

    let router = app_router();
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
