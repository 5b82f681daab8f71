//! Error types for SalesPulse

use thiserror::Error;

/// Result type alias using SalesPulse's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SalesPulse operations
#[derive(Error, Debug)]
pub enum Error {
    /// Data store unreachable or a query failed
    #[error("Data access error: {0}")]
    DataAccess(#[from] sqlx::Error),

    /// Not enough data points to derive a trend
    #[error("Insufficient data: need at least {needed} daily data points, got {got}")]
    InsufficientData {
        /// Minimum number of rows the computation requires
        needed: usize,
        /// Number of rows actually supplied
        got: usize,
    },

    /// Baseline revenue is zero, so growth is undefined
    #[error("Baseline revenue is zero; weekly growth is undefined")]
    ZeroBaseline,

    /// Messaging backend rejected or failed a send
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a delivery error from a backend-provided code or message
    pub fn delivery(detail: impl Into<String>) -> Self {
        Self::Delivery(detail.into())
    }

    /// Create an insufficient-data error
    pub fn insufficient_data(needed: usize, got: usize) -> Self {
        Self::InsufficientData { needed, got }
    }
}
