//! PartnerDash Common Library
//!
//! Shared types and utilities for the partner dashboard:
//!
//! - [`series`] - Daily multi-metric time series (`Sample`, `Series`)
//! - [`window`] - Trailing-window selection and graph UI state
//! - [`model`] - Partners, users, collections, activations and overall metrics
//! - [`color`] - Pastel color hashing and the metric palette
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod color;
pub mod config;
pub mod error;
pub mod model;
pub mod series;
pub mod window;

// Re-export commonly used types at the crate root
pub use color::{Hsl, metric_color, metric_palette, pastel_color};
pub use config::{
    DashboardConfig, DataSourceKind, DisplayConfig, LogFormat, LoggingConfig, RemoteConfig,
    load_config, parse_config,
};
pub use error::{Error, Result};
pub use model::{
    Activation, ActivationUpdate, COLLECTION_CATEGORIES, Collection, CollectionUpdate, Engagement,
    ExternalLink, LeaderboardCategory, LinkDraft, NewActivation, NewCollection, NewPartner,
    NewUser, OverallMetrics, Partner, PartnerUpdate, SocialLinks, User, UserUpdate, top_partner,
};
pub use series::{Sample, Series};
pub use window::{ChartKind, DateRange, Selection, Window, window};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Example
///
/// ```ignore
/// use partnerdash_common::{LoggingConfig, LogFormat, init_tracing};
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Json,
/// };
/// init_tracing(&config)?;
/// ```
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
