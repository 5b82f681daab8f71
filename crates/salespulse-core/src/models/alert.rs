//! Alert and incident data models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a threshold comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Alert fires when the value rises above the threshold
    Above,
    /// Alert fires when the value falls below the threshold
    Below,
}

impl Comparison {
    /// Wording used in alert messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}

/// A metric that crossed its configured threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCondition {
    /// Name of the metric that fired
    pub metric: String,

    /// The value observed
    pub current_value: f64,

    /// The configured boundary
    pub threshold: f64,

    /// Which direction the threshold was crossed in
    pub comparison: Comparison,
}

/// Incident severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Immediate attention required
    High,
    /// Degraded but functioning
    Medium,
    /// Informational
    Low,
}

impl Severity {
    /// Parse a severity label; unknown labels yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Upper-cased label for message rendering
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// An incident being tracked in a message thread
///
/// `thread_ts` anchors all timeline updates; it is the receipt timestamp of
/// the opening message and is only valid for the lifetime of the process run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique identifier
    pub id: Uuid,

    /// Severity level
    pub severity: Severity,

    /// What is going on
    pub description: String,

    /// Channel the incident thread lives in
    pub channel: String,

    /// Thread anchor from the opening message's delivery receipt
    pub thread_ts: String,
}

/// Opaque receipt returned by the messaging backend for a delivered message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReceipt {
    /// Channel the message landed in
    pub channel: String,

    /// Backend timestamp identifier, usable as a thread anchor
    pub ts: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_known_labels() {
        assert_eq!(Severity::parse("high"), Some(Severity::High));
        assert_eq!(Severity::parse("MEDIUM"), Some(Severity::Medium));
        assert_eq!(Severity::parse("Low"), Some(Severity::Low));
    }

    #[test]
    fn test_severity_parse_unknown_label() {
        assert_eq!(Severity::parse("catastrophic"), None);
        assert_eq!(Severity::parse(""), None);
    }
}
