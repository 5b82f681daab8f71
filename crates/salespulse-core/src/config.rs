//! Configuration management for SalesPulse

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Comparison;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Slack configuration
    pub slack: SlackConfig,

    /// Alerting configuration
    pub alerting: AlertingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults, an optional file, and environment
    ///
    /// Environment variables use the `SALESPULSE` prefix with `__` as the
    /// section separator, e.g. `SALESPULSE__SLACK__TOKEN`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("SALESPULSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database URL
    pub url: String,
    /// Maximum connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://sales.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Slack configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Bot token used for the Web API
    pub token: String,
    /// Channel reports and alerts are posted to
    pub default_channel: String,
    /// Request timeout in seconds for Web API calls
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            default_channel: "#sales-alerts".to_string(),
            timeout_secs: 30,
        }
    }
}

/// A configured threshold for one trend metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// Trend metric name, e.g. `weekly_growth_pct`
    pub metric: String,
    /// Numeric boundary
    pub threshold: f64,
    /// Direction that triggers the alert
    pub comparison: Comparison,
}

/// Alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertingConfig {
    /// Lookback window in days for daily metrics
    pub window_days: u32,
    /// Number of products listed in the daily report
    pub top_products: u32,
    /// Threshold rules evaluated against the trend summary
    pub thresholds: Vec<ThresholdRule>,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            top_products: 5,
            thresholds: vec![ThresholdRule {
                metric: "weekly_growth_pct".to_string(),
                threshold: -20.0,
                comparison: Comparison::Below,
            }],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
