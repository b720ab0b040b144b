//! Slotwise - availability and booking service
//!
//! Main entry point: load configuration, build the context, serve HTTP.

use std::sync::Arc;

use anyhow::{Context, Result};
use slotwise_api::utils::logging::init_tracing;
use slotwise_api::{router, AppContext};
use slotwise_domain::Config;
use slotwise_infra::config;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // .env before config so SLOTWISE_* values from it are seen
    let dotenv = dotenvy::dotenv();

    let (config, load_error) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_tracing(&config.logging);

    if let Some(err) = load_error {
        warn!(error = %err, "no configuration found, using defaults");
    }

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => info!(error = %err, "no .env file loaded"),
    }

    let bind_address = config.server.bind_address.clone();
    let ctx = tokio::task::spawn_blocking(move || AppContext::new_with_config(config))
        .await
        .context("context initialisation task failed")?
        .context("failed to initialise application context")?;

    let app = router(Arc::new(ctx));
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(address = %bind_address, "slotwise listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("slotwise stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
