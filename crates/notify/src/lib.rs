//! Slack notifier for AWS Cost Anomaly Detection alerts.
//!
//! This crate provides:
//! - SNS event unwrapping and tolerant anomaly payload normalization
//! - Severity classification by dollar impact
//! - Typed Slack Block Kit rendering with a raw-text fallback
//! - `Notifier` trait with a Slack incoming-webhook implementation
//! - A sequential per-invocation pipeline that aborts on the first failed delivery

pub mod anomaly;
pub mod blocks;
pub mod config;
pub mod event;
pub mod lookup;
pub mod pipeline;
pub mod render;
pub mod severity;
pub mod traits;
pub mod webhook;

pub use anomaly::AnomalyRecord;
pub use blocks::RenderedMessage;
pub use config::Config;
pub use event::RawEvent;
pub use pipeline::{invoke, process_event, InvocationStatus};
pub use severity::Severity;
pub use traits::{Notifier, NotifyError};
pub use webhook::WebhookNotifier;
