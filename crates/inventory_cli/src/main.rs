//! Terminal form UI for the inventory API.
//!
//! # Responsibility
//! - Drive the six item endpoints from line-based forms.
//! - Keep navigation as an explicit `Page` value, starting at `Home`.

mod api;
mod app;
mod page;

use anyhow::Context;
use api::HttpInventoryApi;
use app::App;
use clap::Parser;
use inventory_core::{default_log_level, init_logging, LoggingConfig};
use page::Page;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "inventory_cli")]
#[command(about = "Interactive forms for the inventory API")]
#[command(version)]
struct Cli {
    /// Base URL of the inventory server
    #[arg(long, env = "INVENTORY_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "INVENTORY_CLI_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir {
        init_logging(&LoggingConfig::new(default_log_level(), log_dir))
            .context("failed to initialize logging")?;
    }

    let api = HttpInventoryApi::new(cli.base_url).context("failed to build HTTP client")?;
    let stdin = std::io::stdin();
    let mut app = App::new(api, stdin.lock(), std::io::stdout());
    app.run(Page::Home)?;
    Ok(())
}
