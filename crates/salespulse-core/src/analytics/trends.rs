//! Week-over-week trend computation

use crate::error::{Error, Result};
use crate::models::{DailyMetrics, TrendSummary};

/// Derive trend statistics from a window of daily metrics
///
/// `rows` must be ordered by date descending: the first element is the most
/// recent day, the last element is the oldest day in the window. Growth is
/// computed against the oldest day's revenue.
///
/// Pure function of its input; callers get an explicit error rather than an
/// infinite or NaN growth figure.
pub fn trend_summary(rows: &[DailyMetrics]) -> Result<TrendSummary> {
    if rows.len() < 2 {
        return Err(Error::insufficient_data(2, rows.len()));
    }

    // Slice is non-empty, so first/last always exist
    let current = &rows[0];
    let baseline = &rows[rows.len() - 1];

    if baseline.total_revenue == 0.0 {
        return Err(Error::ZeroBaseline);
    }

    let growth =
        (current.total_revenue - baseline.total_revenue) / baseline.total_revenue * 100.0;

    Ok(TrendSummary {
        current_revenue: current.total_revenue,
        weekly_growth_pct: growth,
        unique_customers_today: current.unique_customers,
        avg_transaction_value: current.avg_transaction_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(days_ago: u64, revenue: f64) -> DailyMetrics {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .checked_sub_days(chrono::Days::new(days_ago))
            .unwrap();
        DailyMetrics {
            date,
            transaction_count: 10,
            total_revenue: revenue,
            unique_customers: 4,
            avg_transaction_value: revenue / 10.0,
        }
    }

    #[test]
    fn test_growth_over_seven_day_window() {
        // index 0 = today, index 6 = seven days ago
        let revenues = [100.0, 110.0, 120.0, 90.0, 95.0, 105.0, 50.0];
        let rows: Vec<DailyMetrics> = revenues
            .iter()
            .enumerate()
            .map(|(i, r)| day(i as u64, *r))
            .collect();

        let summary = trend_summary(&rows).unwrap();
        assert!((summary.current_revenue - 100.0).abs() < 1e-9);
        assert!((summary.weekly_growth_pct - 100.0).abs() < 1e-9);
        assert_eq!(summary.unique_customers_today, 4);
        assert!((summary.avg_transaction_value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_growth() {
        let rows = vec![day(0, 50.0), day(1, 80.0), day(2, 200.0)];
        let summary = trend_summary(&rows).unwrap();
        assert!((summary.weekly_growth_pct - (-75.0)).abs() < 1e-9);
    }

    #[test]
    fn test_single_row_is_insufficient() {
        let rows = vec![day(0, 100.0)];
        match trend_summary(&rows) {
            Err(Error::InsufficientData { needed: 2, got: 1 }) => {}
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_window_is_insufficient() {
        match trend_summary(&[]) {
            Err(Error::InsufficientData { needed: 2, got: 0 }) => {}
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_baseline_is_an_explicit_error() {
        let rows = vec![day(0, 100.0), day(1, 0.0)];
        match trend_summary(&rows) {
            Err(Error::ZeroBaseline) => {}
            other => panic!("expected ZeroBaseline, got {other:?}"),
        }
    }
}
