//! # SalesPulse
//!
//! Daily sales metrics aggregation and Slack alerting pipeline.
//!
//! SalesPulse reads a transactional sales store, derives per-day metrics and
//! week-over-week trends, evaluates configured thresholds, and publishes
//! reports, alerts, and incident threads to Slack.
//!
//! ## Architecture
//!
//! - **Store**: read-only aggregate queries over the SQLite `sales` table
//! - **Analytics**: pure trend derivation from daily metrics windows
//! - **Alerting**: threshold evaluation, pure message formatting, and
//!   delivery with incident threading
//! - **Pipeline**: one sequential run per invocation; scheduling is external
//!
//! ## Quick Start
//!
//! ```bash
//! # One reporting and alerting pass over the last 7 days
//! salespulse run
//!
//! # Open an incident thread
//! salespulse incident --severity high --description "checkout is down"
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pipeline;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{Notifier, SlackApi, SlackClient};
    pub use crate::config::Config;
    pub use crate::db::{MetricsStore, SqlitePool};
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::pipeline::{Pipeline, RunSummary};
}
