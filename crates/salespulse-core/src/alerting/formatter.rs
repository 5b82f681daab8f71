//! Message formatting for reports, alerts, and incidents
//!
//! Everything in this module is pure string/JSON building. Delivery, clock
//! reads, and error handling live in the notifier, so a message is always
//! fully rendered before any send is attempted.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::models::{AlertCondition, Comparison, DailyReport, Severity, TrendSummary};

/// Timeline entry posted under a fresh incident thread
pub const TRACKING_STARTED: &str = "🔍 *Incident Timeline*\n• Incident created and tracking started";

/// A rendered message: mrkdwn fallback text plus optional Block Kit blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Plain mrkdwn text, also used as notification fallback
    pub text: String,

    /// Block Kit payload, when the message carries structure beyond text
    pub blocks: Option<Value>,
}

impl Message {
    fn text_only(text: String) -> Self {
        Self { text, blocks: None }
    }

    fn with_section(text: String) -> Self {
        let blocks = json!([section(&text)]);
        Self {
            text,
            blocks: Some(blocks),
        }
    }
}

/// Format a value as currency: two decimals, comma thousands grouping
pub fn currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Format a percentage with exactly one decimal digit
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Glyph for an incident severity; unrecognized severities fall back to white
pub fn severity_glyph(severity: Option<Severity>) -> &'static str {
    match severity {
        Some(Severity::High) => "🔴",
        Some(Severity::Medium) => "🟡",
        Some(Severity::Low) => "🟢",
        None => "⚪",
    }
}

/// Render the daily sales report
///
/// An empty top-products list renders the report without bullet lines.
pub fn daily_report(report: &DailyReport) -> Message {
    let mut text = format!(
        "📊 *Daily Sales Report*\n\n\
         *Revenue*: {}\n\
         *Orders*: {}\n\
         *Average Order Value*: {}\n\
         *Active Customers*: {}\n\n\
         *Top Products*:\n",
        currency(report.revenue),
        report.orders,
        currency(report.avg_order_value),
        report.active_customers,
    );

    for product in &report.top_products {
        text.push_str(&format!("• {}: {}\n", product.name, currency(product.revenue)));
    }

    Message::with_section(text)
}

/// Render the week-over-week trend summary
pub fn trend_summary(summary: &TrendSummary) -> Message {
    let text = format!(
        "📈 *Sales Trend Summary*\n\
         Revenue: {}\n\
         Weekly Growth: {}\n\
         Unique Customers: {}\n\
         Avg Transaction: {}",
        currency(summary.current_revenue),
        percent(summary.weekly_growth_pct),
        summary.unique_customers_today,
        currency(summary.avg_transaction_value),
    );

    Message::with_section(text)
}

/// Render a threshold alert, stamped with the moment it was generated
///
/// The wall-clock read happens at the caller; this stays a pure function.
pub fn metric_alert(condition: &AlertCondition, at: DateTime<Utc>) -> Message {
    let glyph = match condition.comparison {
        Comparison::Above => "🔴",
        Comparison::Below => "🟡",
    };

    let text = format!(
        "{glyph} *Metric Alert*\n\
         *{}* has crossed the {} threshold\n\
         Current value: {}\n\
         Threshold: {}",
        condition.metric,
        condition.comparison.as_str(),
        condition.current_value,
        condition.threshold,
    );

    // <!date^..> lets clients localize; the fallback is a plain timestamp
    let timestamp = format!(
        "<!date^{}^Alert triggered at {{date_num}} {{time_secs}}|Alert triggered at {}>",
        at.timestamp(),
        at.format("%a %b %e %H:%M:%S %Y"),
    );

    let blocks = json!([
        section(&text),
        { "type": "divider" },
        {
            "type": "context",
            "elements": [
                { "type": "mrkdwn", "text": timestamp }
            ]
        }
    ]);

    Message {
        text,
        blocks: Some(blocks),
    }
}

/// Render the opening message of an incident thread
pub fn incident_opening(severity: Severity, description: &str) -> Message {
    let text = format!(
        "{} *New Incident*\n\
         *Severity*: {}\n\
         *Description*: {}\n\
         Please reply to this thread with updates.",
        severity_glyph(Some(severity)),
        severity.label(),
        description,
    );

    Message::text_only(text)
}

/// Render a freeform incident timeline entry
pub fn incident_timeline(text: &str) -> Message {
    Message::text_only(text.to_string())
}

fn section(text: &str) -> Value {
    json!({
        "type": "section",
        "text": { "type": "mrkdwn", "text": text }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use crate::models::ProductRevenue;

    #[test]
    fn test_currency_grouping_and_decimals() {
        assert_eq!(currency(1234.5), "$1,234.50");
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(999.999), "$1,000.00");
        assert_eq!(currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(currency(-42.5), "-$42.50");
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(percent(12.55), "12.6%");
        assert_eq!(percent(100.0), "100.0%");
        assert_eq!(percent(-7.0), "-7.0%");
    }

    #[test]
    fn test_daily_report_rendering() {
        let report = DailyReport {
            revenue: 1234.5,
            orders: 37,
            avg_order_value: 33.37,
            active_customers: 21,
            top_products: vec![
                ProductRevenue {
                    name: "widget".to_string(),
                    revenue: 800.0,
                },
                ProductRevenue {
                    name: "gadget".to_string(),
                    revenue: 434.5,
                },
            ],
        };

        let message = daily_report(&report);
        assert!(message.text.contains("*Revenue*: $1,234.50"));
        assert!(message.text.contains("*Orders*: 37"));
        assert!(message.text.contains("*Average Order Value*: $33.37"));
        assert!(message.text.contains("*Active Customers*: 21"));
        assert!(message.text.contains("• widget: $800.00"));
        assert!(message.text.contains("• gadget: $434.50"));
        assert!(message.blocks.is_some());
    }

    #[test]
    fn test_daily_report_with_no_products() {
        let report = DailyReport {
            revenue: 100.0,
            orders: 1,
            avg_order_value: 100.0,
            active_customers: 1,
            top_products: vec![],
        };

        let message = daily_report(&report);
        assert!(message.text.contains("*Top Products*:"));
        assert!(!message.text.contains('•'));
    }

    #[test]
    fn test_trend_summary_rendering() {
        let summary = TrendSummary {
            current_revenue: 1500.25,
            weekly_growth_pct: 12.34,
            unique_customers_today: 18,
            avg_transaction_value: 83.35,
        };

        let message = trend_summary(&summary);
        assert!(message.text.contains("Revenue: $1,500.25"));
        assert!(message.text.contains("Weekly Growth: 12.3%"));
        assert!(message.text.contains("Unique Customers: 18"));
        assert!(message.text.contains("Avg Transaction: $83.35"));
    }

    #[test]
    fn test_metric_alert_glyphs_and_context() {
        let at = chrono::Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();

        let above = AlertCondition {
            metric: "current_revenue".to_string(),
            current_value: 100.0,
            threshold: 50.0,
            comparison: Comparison::Above,
        };
        let message = metric_alert(&above, at);
        assert!(message.text.starts_with("🔴"));
        assert!(message.text.contains("has crossed the above threshold"));
        assert!(message.text.contains("Current value: 100"));
        assert!(message.text.contains("Threshold: 50"));

        let blocks = message.blocks.expect("alert carries blocks");
        let rendered = blocks.to_string();
        assert!(rendered.contains("divider"));
        assert!(rendered.contains(&format!("<!date^{}^", at.timestamp())));

        let below = AlertCondition {
            comparison: Comparison::Below,
            ..above
        };
        assert!(metric_alert(&below, at).text.starts_with("🟡"));
    }

    #[test]
    fn test_incident_opening_glyph_per_severity() {
        let high = incident_opening(Severity::High, "checkout is down");
        assert!(high.text.starts_with("🔴"));
        assert!(high.text.contains("*Severity*: HIGH"));
        assert!(high.text.contains("*Description*: checkout is down"));

        assert!(incident_opening(Severity::Medium, "slow queries").text.starts_with("🟡"));
        assert!(incident_opening(Severity::Low, "minor lag").text.starts_with("🟢"));
    }

    #[test]
    fn test_unrecognized_severity_falls_back_to_default_glyph() {
        assert_eq!(severity_glyph(Severity::parse("catastrophic")), "⚪");
    }
}
