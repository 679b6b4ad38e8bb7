//! punchkiosk library root.
//! Exposes the CLI parser, the high-level run() function and the kiosk modules.

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(config_path, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, config_path),
        Commands::Verify { code } => cli::commands::verify::handle(code, cfg),
        Commands::Kiosk { plain } => cli::commands::kiosk::handle(cfg, *plain),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Configuration file chosen by `--config`, or the per-user default.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file)
}

/// Load the file, then apply command-line overrides on top.
pub fn effective_config(cli: &Cli, path: &Path) -> AppResult<Config> {
    let mut cfg = Config::load_from(path)?;

    if let Some(url) = &cli.api_url {
        cfg.api_base_url = url.clone();
    }
    if let Some(store) = &cli.store {
        cfg.store_code = Some(store.clone());
    }
    if let Some(journal) = &cli.journal {
        cfg.journal = journal.clone();
    }

    Ok(cfg)
}

/// stderr subscriber; `RUST_LOG` wins over the configured filter.
pub fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let path = config_path(&cli);
    let cfg = effective_config(&cli, &path)?;

    init_tracing(&cfg);

    dispatch(&cli, &cfg, &path)
}
