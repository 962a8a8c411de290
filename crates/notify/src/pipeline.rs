//! Per-invocation processing of SNS records.
//!
//! Each record is normalized, rendered and delivered before the next one is
//! touched. The first delivery failure aborts the invocation: later records
//! are not attempted and the error surfaces to the caller so the platform's
//! retry policy can take over.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blocks::RenderedMessage;
use crate::config::Config;
use crate::event::{MessageBody, RawEvent};
use crate::render::{render_fallback, render_message};
use crate::traits::{Notifier, NotifyError};
use crate::webhook::WebhookNotifier;

/// Result reported back to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationStatus {
    pub status: String,
    /// Number of records processed.
    pub delivered: usize,
}

impl InvocationStatus {
    pub fn ok(delivered: usize) -> Self {
        Self {
            status: "ok".to_string(),
            delivered,
        }
    }
}

/// Render one record. Non-string bodies always take the fallback shape.
pub fn render_body(body: &MessageBody<'_>) -> RenderedMessage {
    match body {
        MessageBody::Text(raw) => render_message(raw),
        MessageBody::Other(raw) => render_fallback(raw),
    }
}

/// Render and deliver every record of `event` through `notifier`, in order.
pub async fn process_event<N>(event: &RawEvent, notifier: &N) -> Result<InvocationStatus, NotifyError>
where
    N: Notifier + ?Sized,
{
    let messages = event.messages();

    if messages.is_empty() {
        tracing::debug!("event carries no records");
    }

    for (index, raw) in messages.iter().enumerate() {
        let message = render_body(raw);
        let start = std::time::Instant::now();
        let result = notifier.send(&message).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                tracing::info!(
                    record = index,
                    channel = notifier.channel_name(),
                    color = message.color().unwrap_or("none"),
                    duration_ms,
                    "Notification delivered"
                );
            }
            Err(e) => {
                tracing::warn!(
                    record = index,
                    channel = notifier.channel_name(),
                    remaining = messages.len() - index - 1,
                    error = %e,
                    duration_ms,
                    "Notification delivery failed, aborting invocation"
                );
                return Err(e);
            }
        }
    }

    Ok(InvocationStatus::ok(event.record_count()))
}

/// Deliver `event` to the webhook named in `config`.
pub async fn invoke(event: &RawEvent, config: &Config) -> Result<InvocationStatus, NotifyError> {
    let notifier = WebhookNotifier::from_config(config)?;
    process_event(event, &notifier).await
}

/// Handle one raw invocation payload.
///
/// Configuration is resolved through `lookup` before the payload is even
/// decoded, so a missing webhook URL fails the invocation whatever the
/// records contain.
pub async fn handle<F>(payload: Value, lookup: F) -> Result<InvocationStatus, NotifyError>
where
    F: Fn(&str) -> Option<String>,
{
    tracing::info!(event = %payload, "received event");

    let config = Config::from_lookup(lookup).map_err(|e| {
        tracing::error!(error = %e, "missing webhook configuration");
        e
    })?;
    config.log_summary();

    let event: RawEvent = serde_json::from_value(payload)?;
    let status = invoke(&event, &config).await?;

    tracing::info!(delivered = status.delivered, "invocation complete");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    struct MockNotifier {
        sent: Arc<Mutex<Vec<RenderedMessage>>>,
        attempts: Arc<AtomicUsize>,
        fail_on: Option<usize>,
    }

    impl MockNotifier {
        fn new(fail_on: Option<usize>) -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                attempts: Arc::new(AtomicUsize::new(0)),
                fail_on,
            }
        }
    }

    #[async_trait::async_trait]
    impl Notifier for MockNotifier {
        async fn send(&self, message: &RenderedMessage) -> Result<(), NotifyError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(attempt) {
                return Err(NotifyError::Config("mock failure".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }

        fn channel_name(&self) -> &str {
            "mock"
        }
    }

    const EXAMPLE: &str = r#"{"AnomalyId":"a1","Impact":{"TotalImpact":150.5,"TotalImpactPercentage":12.3},"AnomalyStartDate":"2025-11-01T00:00:00Z","AnomalyEndDate":"2025-11-02T00:00:00Z","RootCauses":[{"Service":"EC2","LinkedAccount":"123456789012","Region":"us-east-1"}]}"#;

    #[tokio::test]
    async fn delivers_each_record_in_order() {
        let notifier = MockNotifier::new(None);
        let event = RawEvent::from_messages([EXAMPLE, "plain text alert"]);

        let status = process_event(&event, &notifier).await.unwrap();
        assert_eq!(status, InvocationStatus::ok(2));

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].color(), Some("#C62828"));
        assert!(matches!(sent[1], RenderedMessage::Blocks { .. }));
    }

    #[tokio::test]
    async fn zero_records_makes_no_calls() {
        let notifier = MockNotifier::new(None);
        let status = process_event(&RawEvent::default(), &notifier).await.unwrap();
        assert_eq!(status, InvocationStatus::ok(0));
        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_aborts_remaining_records() {
        let notifier = MockNotifier::new(Some(1));
        let event = RawEvent::from_messages(["one", "two", "three"]);

        let result = process_event(&event, &notifier).await;
        assert!(result.is_err());
        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 2);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let notifier = MockNotifier::new(None);
        let dyn_notifier: &dyn Notifier = &notifier;
        let status = process_event(&RawEvent::from_messages(["x"]), dyn_notifier)
            .await
            .unwrap();
        assert_eq!(status.delivered, 1);
    }

    #[test]
    fn status_serializes_like_lambda_response() {
        let value = serde_json::to_value(InvocationStatus::ok(3)).unwrap();
        assert_eq!(value, serde_json::json!({"status": "ok", "delivered": 3}));
    }

    #[tokio::test]
    async fn non_string_message_falls_back_without_blocking_neighbours() {
        let notifier = MockNotifier::new(None);
        let event: RawEvent = serde_json::from_value(json!({
            "Records": [
                {"Sns": {"Message": {"AnomalyId": "a1", "Impact": {"TotalImpact": 500}}}},
                {"Sns": {"Message": EXAMPLE}}
            ]
        }))
        .unwrap();

        let status = process_event(&event, &notifier).await.unwrap();
        assert_eq!(status, InvocationStatus::ok(2));

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent[0], render_fallback(r#"{"AnomalyId":"a1","Impact":{"TotalImpact":500}}"#));
        assert_eq!(sent[1].color(), Some("#C62828"));
    }

    #[tokio::test]
    async fn handle_rejects_missing_config_before_decoding() {
        let undecodable = json!({"Records": "not-a-list"});
        let result = handle(undecodable, |_| None).await;
        assert!(matches!(result, Err(NotifyError::Config(_))));

        let deliverable = json!({"Records": [{"Sns": {"Message": EXAMPLE}}]});
        let result = handle(deliverable, |_| None).await;
        assert!(matches!(result, Err(NotifyError::Config(_))));
    }

    #[tokio::test]
    async fn handle_surfaces_malformed_envelope() {
        let result = handle(json!({"Records": "not-a-list"}), |_| {
            Some("http://127.0.0.1:9/hook".to_string())
        })
        .await;
        assert!(matches!(result, Err(NotifyError::Serialize(_))));
    }
}
