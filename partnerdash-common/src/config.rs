use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::window::DateRange;

/// Which data-access backend the dashboard talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// In-memory fixtures with generated demo series.
    #[default]
    Mock,
    /// Hosted backend-as-a-service (REST tables + object storage).
    Remote,
}

impl DataSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSourceKind::Mock => "mock",
            DataSourceKind::Remote => "remote",
        }
    }
}

impl std::fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connection settings for the remote backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project base URL (e.g. `https://xyz.example.co`).
    #[serde(default)]
    pub url: String,

    /// Anonymous/service API key. Falls back to `PARTNERDASH_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Storage bucket for images.
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,

    /// Storage bucket for videos.
    #[serde(default = "default_video_bucket")]
    pub video_bucket: String,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_image_bucket() -> String {
    "images".to_string()
}

fn default_video_bucket() -> String {
    "videos".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            image_bucket: default_image_bucket(),
            video_bucket: default_video_bucket(),
        }
    }
}

/// Environment variable consulted when `remote.api_key` is not set.
pub const API_KEY_ENV: &str = "PARTNERDASH_API_KEY";

impl RemoteConfig {
    /// Resolve the API key from the config or the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }
}

/// What the dashboard graphs show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Metrics offered on the overview graph.
    #[serde(default = "default_overview_metrics")]
    pub overview_metrics: Vec<String>,

    /// Metrics offered on a partner's graph.
    #[serde(default = "default_partner_metrics")]
    pub partner_metrics: Vec<String>,

    /// Range selected when a graph is first shown.
    #[serde(default)]
    pub default_range: DateRange,
}

fn default_overview_metrics() -> Vec<String> {
    ["partners", "users", "collections", "activations", "scans", "views"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_partner_metrics() -> Vec<String> {
    ["users", "collections", "activations", "scans", "likes", "views"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            overview_metrics: default_overview_metrics(),
            partner_metrics: default_partner_metrics(),
            default_range: DateRange::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Backend selection.
    #[serde(default)]
    pub data_source: DataSourceKind,

    /// Remote backend settings (used when `data_source` is `remote`).
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Graph settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.data_source == DataSourceKind::Remote {
            if self.remote.url.trim().is_empty() {
                return Err(Error::Config(
                    "remote.url is required when data_source is \"remote\"".to_string(),
                ));
            }
            if !self.remote.url.starts_with("http://") && !self.remote.url.starts_with("https://")
            {
                return Err(Error::Config(format!(
                    "remote.url must be an http(s) URL, got '{}'",
                    self.remote.url
                )));
            }
            if self.remote.timeout_secs == 0 {
                return Err(Error::Config(
                    "remote.timeout_secs must be at least 1".to_string(),
                ));
            }
        }

        if self.display.overview_metrics.is_empty() || self.display.partner_metrics.is_empty() {
            return Err(Error::Config(
                "display metric lists cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config = json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_config() {
        let json5 = r#"
        {
            data_source: "remote",
            remote: {
                url: "https://project.example.co",
                api_key: "anon-key",
            },
            display: {
                default_range: "3months",
            },
            logging: {
                level: "debug",
            },
        }
        "#;

        let config: DashboardConfig = parse_config(json5).unwrap();

        assert_eq!(config.data_source, DataSourceKind::Remote);
        assert_eq!(config.remote.url, "https://project.example.co");
        assert_eq!(config.remote.api_key.as_deref(), Some("anon-key"));
        assert_eq!(config.remote.timeout_secs, 15);
        assert_eq!(config.remote.image_bucket, "images");
        assert_eq!(config.display.default_range, DateRange::ThreeMonths);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config: DashboardConfig = parse_config("{}").unwrap();

        assert_eq!(config.data_source, DataSourceKind::Mock);
        assert_eq!(config.display.default_range, DateRange::FourWeeks);
        assert_eq!(config.display.overview_metrics.len(), 6);
        assert!(!config.display.overview_metrics.contains(&"likes".to_string()));
        assert!(config.display.partner_metrics.contains(&"likes".to_string()));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_requires_url() {
        let config: DashboardConfig = parse_config(r#"{ data_source: "remote" }"#).unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config: DashboardConfig =
            parse_config(r#"{ data_source: "remote", remote: { url: "ftp://x" } }"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_metric_list_rejected() {
        let config: DashboardConfig =
            parse_config(r#"{ display: { overview_metrics: [] } }"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_logging_format() {
        let json5 = r#"
        {
            logging: {
                level: "debug",
                format: "json",
            },
        }
        "#;

        let config: DashboardConfig = parse_config(json5).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let remote = RemoteConfig {
            api_key: Some("from-config".to_string()),
            ..RemoteConfig::default()
        };
        assert_eq!(remote.resolved_api_key().as_deref(), Some("from-config"));
    }
}
