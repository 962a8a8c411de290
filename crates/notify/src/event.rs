//! SNS → Lambda event envelope.
//!
//! Only the parts of the envelope the notifier reads are modelled; unknown
//! keys are ignored and missing or null members fall back to empty values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An invocation event carrying zero or more SNS records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "Records", default)]
    pub records: Option<Vec<NotificationRecord>>,
}

/// One delivered SNS notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns", default)]
    pub sns: Option<SnsNotification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsNotification {
    /// Normally a string. Kept as raw JSON so a producer sending any other
    /// type degrades that one record instead of failing the whole event.
    #[serde(rename = "Message", default)]
    pub message: Option<Value>,
}

/// The body of one record as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody<'a> {
    /// A string message, the normal SNS shape.
    Text(&'a str),
    /// A non-string `Message`, kept as its JSON text. Never treated as an anomaly.
    Other(String),
}

impl MessageBody<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Other(s) => s,
        }
    }
}

impl NotificationRecord {
    /// The embedded message, or `Text("")` when the record carries none.
    pub fn message(&self) -> MessageBody<'_> {
        match self.sns.as_ref().and_then(|sns| sns.message.as_ref()) {
            None | Some(Value::Null) => MessageBody::Text(""),
            Some(Value::String(s)) => MessageBody::Text(s),
            Some(other) => MessageBody::Other(other.to_string()),
        }
    }
}

impl RawEvent {
    /// Build an event from message bodies, one record per message.
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = messages
            .into_iter()
            .map(|m| NotificationRecord {
                sns: Some(SnsNotification {
                    message: Some(Value::String(m.into())),
                }),
            })
            .collect();
        Self {
            records: Some(records),
        }
    }

    pub fn records(&self) -> &[NotificationRecord] {
        self.records.as_deref().unwrap_or_default()
    }

    /// Number of records in the event.
    pub fn record_count(&self) -> usize {
        self.records().len()
    }

    /// Message bodies in record order.
    pub fn messages(&self) -> Vec<MessageBody<'_>> {
        self.records().iter().map(NotificationRecord::message).collect()
    }
}
