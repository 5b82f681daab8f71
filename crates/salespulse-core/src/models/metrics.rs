//! Metrics data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated sales metrics for one calendar date
///
/// Derived from the `sales` table per query; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyMetrics {
    /// Calendar date the row aggregates
    pub date: NaiveDate,

    /// Number of transactions on that date
    pub transaction_count: i64,

    /// Sum of quantity x price over the date
    pub total_revenue: f64,

    /// Count of distinct customers
    pub unique_customers: i64,

    /// Average transaction value
    pub avg_transaction_value: f64,
}

/// Trend statistics derived from a descending window of daily metrics
///
/// Current day is the newest row in the window, the baseline is the oldest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Revenue for the most recent day in the window
    pub current_revenue: f64,

    /// Revenue growth vs the oldest day in the window, in percent
    pub weekly_growth_pct: f64,

    /// Distinct customers on the most recent day
    pub unique_customers_today: i64,

    /// Average transaction value on the most recent day
    pub avg_transaction_value: f64,
}

/// Revenue attributed to a single product over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRevenue {
    /// Product identifier or display name
    pub name: String,

    /// Revenue for this product over the window
    pub revenue: f64,
}

/// Inputs for the daily report message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Revenue for the reporting day
    pub revenue: f64,

    /// Order count for the reporting day
    pub orders: i64,

    /// Average order value
    pub avg_order_value: f64,

    /// Distinct active customers
    pub active_customers: i64,

    /// Top products by revenue, in display order
    pub top_products: Vec<ProductRevenue>,
}

impl DailyReport {
    /// Build a report from the most recent day's metrics plus top products
    pub fn from_metrics(current: &DailyMetrics, top_products: Vec<ProductRevenue>) -> Self {
        Self {
            revenue: current.total_revenue,
            orders: current.transaction_count,
            avg_order_value: current.avg_transaction_value,
            active_customers: current.unique_customers,
            top_products,
        }
    }
}
