//! PartnerDash - Desktop dashboard for partner analytics.
//!
//! Loads the JSON5 configuration, connects the configured data source and
//! runs the iced application on top of it.

use std::path::PathBuf;

use clap::Parser;
use iced::application;

use partnerdash::PartnerDash;
use partnerdash_common::{DashboardConfig, DataSourceKind, init_tracing, load_config};

/// Partner analytics dashboard.
#[derive(Parser, Debug)]
#[command(name = "partnerdash")]
#[command(about = "Browse partners, users and engagement metrics")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the in-memory demo store regardless of configuration.
    #[arg(long)]
    demo: bool,

    /// Log level (trace, debug, info, warn, error). Overrides config.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = resolve_config(args.config.as_ref())?;
    if args.demo {
        config.data_source = DataSourceKind::Mock;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    init_tracing(&config.logging)?;
    tracing::info!(data_source = %config.data_source, "Starting PartnerDash");

    let store = partnerdash_store::connect(&config)?;
    let display = config.display.clone();

    application(
        move || PartnerDash::boot(store.clone(), display.clone()),
        PartnerDash::update,
        PartnerDash::view,
    )
    .title(PartnerDash::title)
    .theme(PartnerDash::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

/// Explicit path, then the per-user config file, then defaults.
fn resolve_config(explicit: Option<&PathBuf>) -> anyhow::Result<DashboardConfig> {
    if let Some(path) = explicit {
        return Ok(load_config(path)?);
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(load_config(&path)?),
        _ => Ok(DashboardConfig::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("partnerdash").join("config.json5"))
}
