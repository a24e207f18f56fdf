//! HTTP front end: `GET /`, `POST /scan` and `GET /download`.
mod config;
mod listener;
mod logging;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use scanner_engine::{Downloader, FetchSettings, PageScanner};
use scanner_logging::scanner_info;
use tokio::net::TcpListener;

use config::ServerConfig;
use routes::AppState;

pub(crate) async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    logging::initialize(config.log_destination, config.log_level);

    let state = Arc::new(AppState::new(FetchSettings::default())?);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    scanner_info!("File scanner listening on http://{}", listener.local_addr()?);

    listener::serve(listener, state).await
}
