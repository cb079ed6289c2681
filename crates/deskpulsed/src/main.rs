//! deskpulse daemon - ticket lifecycle and employee performance service.

use anyhow::{Context, Result};
use clap::Parser;
use deskpulsed::config::Config;
use deskpulsed::server::{self, AppState};
use deskpulsed::store::TicketStore;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

/// deskpulse daemon
#[derive(Parser)]
#[command(name = "deskpulsed")]
#[command(about = "Support ticket tracking and employee performance service", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: /etc/deskpulse/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides config and $DESKPULSE_BIND
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database path, overrides config and $DESKPULSE_DB
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging before the config is read; RUST_LOG wins over the
    // configured level.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let filter_from_env = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env_overrides();
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(db) = cli.db {
        config.storage.db_path = db;
    }

    if !filter_from_env {
        let level = EnvFilter::try_new(&config.log.level)
            .with_context(|| format!("Invalid log level '{}'", config.log.level))?;
        filter_handle
            .reload(level)
            .context("Failed to apply configured log level")?;
    }

    info!("deskpulsed v{} starting", env!("CARGO_PKG_VERSION"));
    match &config.source {
        Some(path) => info!("  Config: {}", path.display()),
        None => info!("  Config: built-in defaults"),
    }

    let store = TicketStore::open_with_timeout(
        &config.storage.db_path,
        config.storage.busy_timeout(),
    )
    .context("Failed to open ticket database")?;
    info!("  Database ready: {}", store.path().display());

    server::run(AppState::new(store), &config.server.bind).await
}
