//! Server entry point: configure logging, create the database, serve HTTP.

use anyhow::Context;
use clap::Parser;
use inventory_core::db::open_db;
use inventory_core::init_logging;
use inventory_server::{router, AppState, ServerConfig};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;

    init_logging(&config.logging(&cwd)).context("failed to initialize logging")?;

    // Create the file and apply migrations before accepting requests.
    drop(
        open_db(&config.db_path)
            .with_context(|| format!("failed to open {}", config.db_path.display()))?,
    );
    info!(
        "event=db_ready module=server status=ok db_path={}",
        config.db_path.display()
    );

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("event=server_listen module=server status=ok addr={addr}");

    axum::serve(listener, router(AppState::new(config.db_path.clone()))).await?;
    Ok(())
}
