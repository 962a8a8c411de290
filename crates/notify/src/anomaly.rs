//! Normalization of Cost Anomaly Detection payloads.
//!
//! The same anomaly can arrive flat (SNS subscription) or wrapped under a
//! `detail` key (EventBridge), in either `TitleCase` or `camelCase`. This
//! module turns any of those shapes into a single [`AnomalyRecord`].

use serde_json::Value;

use crate::lookup::{
    display, is_truthy, lookup, lookup_number, lookup_or, lookup_text, walk, KeyPath,
};

const ANOMALY_ID: &[KeyPath] = &[&["AnomalyId"], &["anomalyId"]];
const START_DATE: &[KeyPath] = &[&["AnomalyStartDate"], &["anomalyStartDate"]];
const END_DATE: &[KeyPath] = &[&["AnomalyEndDate"], &["anomalyEndDate"]];
const TOTAL_IMPACT: &[KeyPath] = &[&["Impact", "TotalImpact"], &["impact", "totalImpact"]];
const TOTAL_IMPACT_PERCENTAGE: &[KeyPath] = &[
    &["Impact", "TotalImpactPercentage"],
    &["impact", "totalImpactPercentage"],
];
const ROOT_CAUSES: &[KeyPath] = &[&["RootCauses"], &["rootCauses"]];
const DETAILS_LINK: &[KeyPath] = &[&["anomalyDetailsLink"], &["AnomalyDetailsLink"]];

const SERVICE: &[KeyPath] = &[&["Service"], &["service"]];
const LINKED_ACCOUNT: &[KeyPath] = &[&["LinkedAccount"], &["linkedAccount"]];
const LINKED_ACCOUNT_NAME: &[KeyPath] = &[&["LinkedAccountName"], &["linkedAccountName"]];
const REGION: &[KeyPath] = &[&["Region"], &["region"]];
const USAGE_TYPE: &[KeyPath] = &[&["UsageType"], &["usageType"]];

/// The primary (first) root cause of an anomaly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootCause {
    pub service: Option<String>,
    pub linked_account: Option<String>,
    pub linked_account_name: Option<String>,
    pub region: Option<String>,
    pub usage_type: Option<String>,
}

impl RootCause {
    fn from_value(value: &Value) -> Self {
        Self {
            service: lookup_text(value, SERVICE),
            linked_account: lookup_text(value, LINKED_ACCOUNT),
            linked_account_name: lookup_text(value, LINKED_ACCOUNT_NAME),
            region: lookup_text(value, REGION),
            usage_type: lookup_text(value, USAGE_TYPE),
        }
    }

    /// Account attribution. A name is only trusted alongside an id.
    pub fn account(&self) -> Option<AccountInfo> {
        let id = self.linked_account.as_deref()?;
        Some(AccountInfo {
            id: id.trim().to_string(),
            name: self.linked_account_name.clone(),
        })
    }
}

/// Linked account the anomaly is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    /// Account id, trimmed of surrounding whitespace.
    pub id: String,
    pub name: Option<String>,
}

/// A normalized anomaly. Every field is optional; a record only exists
/// when an anomaly id was found.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyRecord {
    pub anomaly_id: String,
    /// Start date, already truncated to `YYYY-MM-DD` when it was a timestamp.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_impact: Option<f64>,
    pub total_impact_percentage: Option<f64>,
    /// First entry of the root-cause list; later entries are ignored.
    pub root_cause: Option<RootCause>,
    pub details_link: Option<String>,
}

impl AnomalyRecord {
    /// Parse a raw notification message. Returns `None` when the message is
    /// not JSON, not an object, or carries no anomaly id at either depth.
    pub fn parse(message: &str) -> Option<Self> {
        let parsed: Value = match serde_json::from_str(message) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "message is not JSON");
                return None;
            }
        };
        let root = find_anomaly_root(&parsed)?;
        Self::from_root(root)
    }

    /// Build a record from an object already known to be the anomaly root.
    pub fn from_root(root: &Value) -> Option<Self> {
        let anomaly_id = lookup_text(root, ANOMALY_ID)?;

        let no_causes = Value::Array(Vec::new());
        let root_cause = match lookup_or(root, ROOT_CAUSES, &no_causes) {
            Value::Array(causes) => causes.first().map(RootCause::from_value),
            _ => None,
        };

        Some(Self {
            anomaly_id,
            start_date: lookup_date(root, START_DATE),
            end_date: lookup_date(root, END_DATE),
            total_impact: lookup_number(root, TOTAL_IMPACT),
            total_impact_percentage: lookup_number(root, TOTAL_IMPACT_PERCENTAGE),
            root_cause,
            details_link: lookup(root, DETAILS_LINK).map(display),
        })
    }

    /// Account attribution from the primary root cause.
    pub fn account(&self) -> Option<AccountInfo> {
        self.root_cause.as_ref().and_then(RootCause::account)
    }
}

/// Pick the object that holds the anomaly: the payload itself, or its
/// `detail` member for EventBridge-style envelopes.
pub fn find_anomaly_root(parsed: &Value) -> Option<&Value> {
    let obj = parsed.as_object()?;
    if has_anomaly_id(parsed) {
        return Some(parsed);
    }
    match obj.get("detail") {
        Some(detail) if detail.is_object() && has_anomaly_id(detail) => Some(detail),
        _ => None,
    }
}

fn has_anomaly_id(value: &Value) -> bool {
    ANOMALY_ID
        .iter()
        .any(|path| walk(value, path).is_some_and(is_truthy))
}

fn lookup_date(root: &Value, paths: &[KeyPath]) -> Option<String> {
    lookup(root, paths).filter(|v| is_truthy(v)).map(format_date)
}

/// Reduce an ISO timestamp to its date part. Non-strings and date-only
/// strings are rendered unchanged.
pub fn format_date(value: &Value) -> String {
    match value {
        Value::String(s) => match s.split_once('T') {
            Some((date, _)) => date.to_string(),
            None => s.clone(),
        },
        other => display(other),
    }
}
