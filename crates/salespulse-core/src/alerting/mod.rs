//! Alerting system for SalesPulse
//!
//! Threshold evaluation, message formatting, and Slack delivery with
//! incident threading.

mod evaluator;
pub mod formatter;
mod notifier;
mod slack;

pub use evaluator::{evaluate, metric_value};
pub use notifier::Notifier;
pub use slack::{SlackApi, SlackClient};
