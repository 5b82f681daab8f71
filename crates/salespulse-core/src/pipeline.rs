//! Single-run reporting and alerting pipeline
//!
//! One invocation does one pass: query the store, derive the trend, post the
//! report, evaluate thresholds, post alerts. Aggregation failures abort the
//! run; delivery failures are logged by the notifier and only counted here.

use tracing::info;

use crate::alerting::{evaluate, metric_value, Notifier, SlackApi};
use crate::analytics::trend_summary;
use crate::config::AlertingConfig;
use crate::db::MetricsStore;
use crate::error::Result;
use crate::models::DailyReport;

/// Outcome counters for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Threshold rules that fired
    pub alerts_triggered: usize,
    /// Messages that reached the channel
    pub delivered: usize,
    /// Messages the backend rejected
    pub failed_deliveries: usize,
}

/// The metrics-to-alerts pipeline
pub struct Pipeline<S: SlackApi> {
    store: MetricsStore,
    notifier: Notifier<S>,
    config: AlertingConfig,
    channel: String,
}

impl<S: SlackApi> Pipeline<S> {
    /// Assemble a pipeline from its collaborators
    pub fn new(
        store: MetricsStore,
        notifier: Notifier<S>,
        config: AlertingConfig,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
            channel: channel.into(),
        }
    }

    /// Execute one run
    ///
    /// Store and aggregation errors propagate; a partially delivered run
    /// (report sent, alert not) is acceptable and reflected in the summary.
    pub async fn run(&self) -> Result<RunSummary> {
        let rows = self.store.daily_metrics(self.config.window_days).await?;
        let trend = trend_summary(&rows)?;

        let top_products = self
            .store
            .top_products(self.config.window_days, self.config.top_products)
            .await?;
        let report = DailyReport::from_metrics(&rows[0], top_products);

        let mut summary = RunSummary::default();

        count(
            &mut summary,
            self.notifier.post_trend_summary(&self.channel, &trend).await,
        );
        count(
            &mut summary,
            self.notifier.post_daily_report(&self.channel, &report).await,
        );

        for rule in &self.config.thresholds {
            let Some(value) = metric_value(&trend, &rule.metric) else {
                continue;
            };

            if let Some(condition) = evaluate(&rule.metric, value, rule.threshold, rule.comparison)
            {
                summary.alerts_triggered += 1;
                count(
                    &mut summary,
                    self.notifier.post_metric_alert(&self.channel, &condition).await,
                );
            }
        }

        info!(
            channel = %self.channel,
            alerts_triggered = summary.alerts_triggered,
            delivered = summary.delivered,
            failed = summary.failed_deliveries,
            "Pipeline run complete"
        );

        Ok(summary)
    }
}

fn count<T>(summary: &mut RunSummary, receipt: Option<T>) {
    if receipt.is_some() {
        summary.delivered += 1;
    } else {
        summary.failed_deliveries += 1;
    }
}
