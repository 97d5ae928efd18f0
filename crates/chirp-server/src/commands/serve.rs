use anyhow::{Context, Result};
use chirp_config::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use chirp_server::{http, shutdown::shutdown_signal, startup};

use super::runtime;

pub fn cmd_serve(config: AppConfig) -> Result<()> {
    config.validate().context("invalid configuration")?;
    runtime(config.server.workers)?.block_on(serve(config))
}

async fn serve(config: AppConfig) -> Result<()> {
    let ready = startup(&config).await?;
    let app = http::router(&config, ready.db);

    let address = config.server.bind_addr();
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("bind {address}"))?;
    info!(%address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP")?;

    info!("Server stopped");
    Ok(())
}
