//! Server configuration from CLI flags and environment.

use clap::Parser;
use inventory_core::{default_log_level, LoggingConfig};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "inventory_server")]
#[command(about = "HTTP API for the inventory item store")]
#[command(version)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "INVENTORY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "INVENTORY_PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database file, created on first start
    #[arg(long, env = "INVENTORY_DB_PATH", default_value = "inventory.db")]
    pub db_path: PathBuf,

    /// Directory for rolling log files (default: ./logs)
    #[arg(long, env = "INVENTORY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (default depends on build mode)
    #[arg(long, env = "INVENTORY_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }

    /// Resolves logging settings; relative directories are anchored at `cwd`.
    pub fn logging(&self, cwd: &std::path::Path) -> LoggingConfig {
        let log_dir = match &self.log_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join("logs"),
        };
        let level = self
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());

        LoggingConfig {
            level,
            log_dir,
            echo_stderr: true,
        }
    }
}
