mod domain;
mod clients;
mod config;
mod etag;
mod http;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use crate::app_system::{ProductSystem, setup_tracing};
use crate::config::{CliArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ServerConfig::from_args(CliArgs::parse())?;
    info!(bind = %config.http_bind_address, "Starting product store");

    let system = ProductSystem::new(config.mailbox_capacity);
    let router = http::router(system.product_client.clone());

    let listener = TcpListener::bind(config.http_bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.http_bind_address))?;
    info!(bind = %listener.local_addr()?, "listening");

    // The router owns a client clone; it is dropped when serving ends.
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!(error = %e, "HTTP server failed");
    }

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    served?;

    info!("Application completed successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
