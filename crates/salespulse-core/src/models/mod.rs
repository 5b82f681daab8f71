//! Data models for SalesPulse

mod alert;
mod metrics;
mod transaction;

pub use alert::*;
pub use metrics::*;
pub use transaction::*;
