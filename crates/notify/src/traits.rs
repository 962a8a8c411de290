//! Notifier trait definition and shared error types.

use crate::blocks::RenderedMessage;

/// Errors that can occur while configuring or delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Trait for notification channel implementations.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a rendered message through this channel.
    async fn send(&self, message: &RenderedMessage) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "slack-webhook").
    fn channel_name(&self) -> &str;
}
