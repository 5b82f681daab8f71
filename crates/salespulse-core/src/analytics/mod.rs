//! Trend analytics over daily sales metrics

mod trends;

pub use trends::trend_summary;
