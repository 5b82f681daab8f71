//! Message delivery and incident threading
//!
//! The notifier is the only effectful part of the alerting stack. Delivery
//! failures are logged and converted to `None` so a messaging outage never
//! aborts metric computation that already succeeded; callers that need the
//! raw error use [`Notifier::post_message`] directly.

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AlertCondition, DailyReport, Incident, MessageReceipt, Severity, TrendSummary};

use super::formatter::{self, Message};
use super::slack::SlackApi;

/// Delivers formatted messages and manages incident threads
pub struct Notifier<S: SlackApi> {
    client: S,
}

impl<S: SlackApi> Notifier<S> {
    /// Create a notifier over an injected delivery client
    pub fn new(client: S) -> Self {
        Self { client }
    }

    /// Send one rendered message; delivery errors propagate
    pub async fn post_message(&self, channel: &str, message: &Message) -> Result<MessageReceipt> {
        self.client
            .post_message(channel, &message.text, message.blocks.as_ref())
            .await
    }

    /// Format and deliver the daily report; `None` means "not delivered"
    pub async fn post_daily_report(
        &self,
        channel: &str,
        report: &DailyReport,
    ) -> Option<MessageReceipt> {
        self.deliver(channel, &formatter::daily_report(report), "daily report")
            .await
    }

    /// Format and deliver a trend summary; `None` means "not delivered"
    pub async fn post_trend_summary(
        &self,
        channel: &str,
        summary: &TrendSummary,
    ) -> Option<MessageReceipt> {
        self.deliver(channel, &formatter::trend_summary(summary), "trend summary")
            .await
    }

    /// Format and deliver a threshold alert; `None` means "not delivered"
    pub async fn post_metric_alert(
        &self,
        channel: &str,
        condition: &AlertCondition,
    ) -> Option<MessageReceipt> {
        let message = formatter::metric_alert(condition, Utc::now());
        self.deliver(channel, &message, "metric alert").await
    }

    /// Open an incident thread: an opening message plus one timeline entry
    ///
    /// The opening receipt is authoritative. If the opening post fails there
    /// is no incident and no follow-up is attempted; if only the follow-up
    /// fails the incident still exists and the failure is logged.
    pub async fn create_incident(
        &self,
        channel: &str,
        severity: Severity,
        description: &str,
    ) -> Option<Incident> {
        let opening = formatter::incident_opening(severity, description);

        let receipt = match self.post_message(channel, &opening).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!(error = %e, channel, "Failed to open incident");
                return None;
            }
        };

        let incident = Incident {
            id: Uuid::new_v4(),
            severity,
            description: description.to_string(),
            channel: channel.to_string(),
            thread_ts: receipt.ts,
        };

        info!(incident_id = %incident.id, channel, "Incident opened");

        if let Err(e) = self
            .client
            .post_threaded(channel, &incident.thread_ts, formatter::TRACKING_STARTED)
            .await
        {
            warn!(
                error = %e,
                incident_id = %incident.id,
                "Incident opened but initial timeline entry was not delivered"
            );
        }

        Some(incident)
    }

    /// Append a timeline entry under an incident's thread
    pub async fn add_incident_update(
        &self,
        incident: &Incident,
        text: &str,
    ) -> Option<MessageReceipt> {
        let entry = formatter::incident_timeline(text);

        match self
            .client
            .post_threaded(&incident.channel, &incident.thread_ts, &entry.text)
            .await
        {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                warn!(
                    error = %e,
                    incident_id = %incident.id,
                    "Incident update was not delivered"
                );
                None
            }
        }
    }

    async fn deliver(
        &self,
        channel: &str,
        message: &Message,
        kind: &'static str,
    ) -> Option<MessageReceipt> {
        match self.post_message(channel, message).await {
            Ok(receipt) => {
                info!(channel, kind, ts = %receipt.ts, "Message delivered");
                Some(receipt)
            }
            Err(e) => {
                error!(error = %e, channel, kind, "Message was not delivered");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    use crate::error::Error;
    use crate::models::Comparison;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Post { channel: String, text: String },
        Threaded { channel: String, thread_ts: String, text: String },
    }

    #[derive(Default)]
    struct FakeSlack {
        calls: Mutex<Vec<Call>>,
        fail_posts: bool,
        fail_threaded: bool,
    }

    impl FakeSlack {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SlackApi for FakeSlack {
        async fn post_message(
            &self,
            channel: &str,
            text: &str,
            _blocks: Option<&Value>,
        ) -> Result<MessageReceipt> {
            self.calls.lock().unwrap().push(Call::Post {
                channel: channel.to_string(),
                text: text.to_string(),
            });

            if self.fail_posts {
                return Err(Error::delivery("channel_not_found"));
            }

            Ok(MessageReceipt {
                channel: channel.to_string(),
                ts: format!("1756540800.{:06}", self.calls.lock().unwrap().len()),
            })
        }

        async fn post_threaded(
            &self,
            channel: &str,
            thread_ts: &str,
            text: &str,
        ) -> Result<MessageReceipt> {
            self.calls.lock().unwrap().push(Call::Threaded {
                channel: channel.to_string(),
                thread_ts: thread_ts.to_string(),
                text: text.to_string(),
            });

            if self.fail_threaded {
                return Err(Error::delivery("thread_not_found"));
            }

            Ok(MessageReceipt {
                channel: channel.to_string(),
                ts: format!("1756540801.{:06}", self.calls.lock().unwrap().len()),
            })
        }
    }

    fn condition() -> AlertCondition {
        AlertCondition {
            metric: "weekly_growth_pct".to_string(),
            current_value: -30.0,
            threshold: -20.0,
            comparison: Comparison::Below,
        }
    }

    #[tokio::test]
    async fn test_metric_alert_delivery_failure_returns_none() {
        let notifier = Notifier::new(FakeSlack {
            fail_posts: true,
            ..FakeSlack::default()
        });

        let receipt = notifier.post_metric_alert("#sales-alerts", &condition()).await;
        assert!(receipt.is_none());
    }

    #[tokio::test]
    async fn test_metric_alert_delivery_success() {
        let notifier = Notifier::new(FakeSlack::default());

        let receipt = notifier.post_metric_alert("#sales-alerts", &condition()).await;
        assert!(receipt.is_some());
    }

    #[tokio::test]
    async fn test_create_incident_threads_tracking_entry() {
        let notifier = Notifier::new(FakeSlack::default());

        let incident = notifier
            .create_incident("#sales-alerts", Severity::High, "checkout is down")
            .await
            .expect("incident created");

        assert_eq!(incident.severity, Severity::High);
        assert_eq!(incident.channel, "#sales-alerts");

        let calls = notifier.client.calls();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            Call::Threaded { thread_ts, text, .. } => {
                assert_eq!(thread_ts, &incident.thread_ts);
                assert!(text.contains("tracking started"));
            }
            other => panic!("expected threaded follow-up, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_incident_opening_failure_skips_follow_up() {
        let notifier = Notifier::new(FakeSlack {
            fail_posts: true,
            ..FakeSlack::default()
        });

        let incident = notifier
            .create_incident("#sales-alerts", Severity::High, "checkout is down")
            .await;

        assert!(incident.is_none());

        // Only the failed opening post, never the threaded follow-up
        let calls = notifier.client.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Post { .. }));
    }

    #[tokio::test]
    async fn test_create_incident_survives_follow_up_failure() {
        let notifier = Notifier::new(FakeSlack {
            fail_threaded: true,
            ..FakeSlack::default()
        });

        let incident = notifier
            .create_incident("#sales-alerts", Severity::Medium, "slow queries")
            .await;

        assert!(incident.is_some());
    }

    #[tokio::test]
    async fn test_add_incident_update_threads_under_anchor() {
        let notifier = Notifier::new(FakeSlack::default());

        let incident = notifier
            .create_incident("#sales-alerts", Severity::Low, "minor lag")
            .await
            .expect("incident created");

        let receipt = notifier
            .add_incident_update(&incident, "mitigation in progress")
            .await;
        assert!(receipt.is_some());

        let calls = notifier.client.calls();
        match calls.last().unwrap() {
            Call::Threaded { thread_ts, text, .. } => {
                assert_eq!(thread_ts, &incident.thread_ts);
                assert_eq!(text, "mitigation in progress");
            }
            other => panic!("expected threaded update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_incident_update_failure_returns_none() {
        let fake = FakeSlack::default();
        let notifier = Notifier::new(fake);

        let incident = notifier
            .create_incident("#sales-alerts", Severity::Low, "minor lag")
            .await
            .expect("incident created");

        let failing = Notifier::new(FakeSlack {
            fail_threaded: true,
            ..FakeSlack::default()
        });
        let receipt = failing.add_incident_update(&incident, "update").await;
        assert!(receipt.is_none());
    }
}
