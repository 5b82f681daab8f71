//! Database layer for SalesPulse
//!
//! Provides the SQLite connection pool and read-only aggregate queries
//! over the transactional `sales` table.

mod sqlite;

pub use sqlite::{MetricsStore, SqlitePool};
