//! Threshold evaluation

use tracing::warn;

use crate::models::{AlertCondition, Comparison, TrendSummary};

/// Compare a metric value against a threshold
///
/// Returns an [`AlertCondition`] only when the value is strictly past the
/// boundary; equality never fires in either direction. Pure, no I/O.
pub fn evaluate(
    metric: &str,
    current_value: f64,
    threshold: f64,
    comparison: Comparison,
) -> Option<AlertCondition> {
    let breached = match comparison {
        Comparison::Above => current_value > threshold,
        Comparison::Below => current_value < threshold,
    };

    breached.then(|| AlertCondition {
        metric: metric.to_string(),
        current_value,
        threshold,
        comparison,
    })
}

/// Resolve a configured metric name against a trend summary
///
/// Unknown names are logged and produce no value, so a typo in configuration
/// degrades to "no alert" rather than a failed run.
pub fn metric_value(summary: &TrendSummary, metric: &str) -> Option<f64> {
    match metric {
        "current_revenue" => Some(summary.current_revenue),
        "weekly_growth_pct" => Some(summary.weekly_growth_pct),
        "unique_customers" => Some(summary.unique_customers_today as f64),
        "avg_transaction_value" => Some(summary.avg_transaction_value),
        _ => {
            warn!(metric, "Unknown trend metric in threshold configuration");
            None
        }
    }
}
