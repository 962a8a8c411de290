//! Slack incoming-webhook notifier.
//!
//! Delivers rendered messages as JSON payloads with a single POST per
//! message. There are no retries; failures are returned so the invoking
//! platform can apply its own retry policy.

use std::time::Duration;

use crate::blocks::RenderedMessage;
use crate::config::{redact_url, Config};
use crate::traits::{Notifier, NotifyError};

/// Posts messages to a Slack incoming webhook.
#[derive(Debug)]
pub struct WebhookNotifier {
    /// Target URL. Contains the webhook secret.
    url: String,
    /// Scheme and host of `url`, for logs.
    host: String,
    timeout: Duration,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier for `url` with the given request timeout.
    pub fn new(url: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let host = redact_url(&url);
        Ok(Self {
            url,
            host,
            timeout,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        Self::new(config.webhook_url.clone(), config.timeout)
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, message: &RenderedMessage) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(message)?;

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    webhook = %self.host,
                    timeout_secs = self.timeout.as_secs(),
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    error = %e,
                    "webhook request failed"
                );
                NotifyError::Http(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(
                webhook = %self.host,
                %status,
                body = %body_text,
                "webhook returned non-2xx status"
            );
            return Err(NotifyError::Status {
                status,
                body: body_text,
            });
        }

        tracing::debug!(webhook = %self.host, %status, "webhook notification delivered");

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "slack-webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_configured_timeout() {
        let config = Config {
            webhook_url: "https://hooks.slack.com/services/T/B/X".to_string(),
            timeout: Duration::from_secs(10),
        };
        let notifier = WebhookNotifier::from_config(&config).unwrap();
        assert_eq!(notifier.timeout, Duration::from_secs(10));
        assert_eq!(notifier.host, "https://hooks.slack.com");
        assert_eq!(notifier.url, config.webhook_url);
    }

    #[test]
    fn channel_name_is_slack_webhook() {
        let notifier =
            WebhookNotifier::new("https://example.com/hook".into(), Duration::from_secs(1)).unwrap();
        assert_eq!(notifier.channel_name(), "slack-webhook");
    }
}
