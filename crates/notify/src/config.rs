use std::env;
use std::time::Duration;

use serde::Serialize;

use crate::traits::NotifyError;

/// Env var holding the Slack incoming-webhook URL.
pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";

/// Outbound request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Read an env var, treating empty values as unset.
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Strip everything after the host so a webhook token never reaches logs.
pub fn redact_url(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => format!(
            "{}://{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or_default()
        ),
        Err(_) => "(invalid url)".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Destination webhook. The path embeds the secret token, so never log it whole.
    #[serde(skip_serializing)]
    pub webhook_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Build config from process environment (call `load_dotenv()` first
    /// when running locally).
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::from_lookup(env_opt)
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup(WEBHOOK_URL_VAR)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                NotifyError::Config(format!("{WEBHOOK_URL_VAR} environment variable is not set"))
            })?;

        Ok(Self {
            webhook_url,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Webhook scheme and host only, safe for logs.
    pub fn webhook_host(&self) -> String {
        redact_url(&self.webhook_url)
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!(
            webhook = %self.webhook_host(),
            timeout_secs = self.timeout.as_secs(),
            "config loaded"
        );
    }
}
