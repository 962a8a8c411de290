//! Rendering of normalized anomalies into Slack messages.

use crate::anomaly::{AccountInfo, AnomalyRecord, RootCause};
use crate::blocks::{Attachment, Block, ButtonStyle, Element, RenderedMessage, TextObject};
use crate::severity::Severity;

/// Console page listing all detected anomalies, used when the payload
/// carries no per-anomaly link.
pub const DEFAULT_CONSOLE_URL: &str =
    "https://console.aws.amazon.com/cost-management/home?#/anomaly-detection/anomalies";

pub const HEADER_TITLE: &str = "AWS Cost Anomaly Detected";
pub const FALLBACK_HEADER: &str =
    ":rotating_light: AWS Cost Anomaly Notification :rotating_light:";
pub const CONSOLE_BUTTON_LABEL: &str = "Open in AWS Console";
pub const FOOTER: &str = "Sent by Cost Anomaly Detection → SNS → Lambda → Slack";

/// Render a raw notification message: rich when it normalizes to an
/// anomaly, otherwise the raw-text fallback.
pub fn render_message(raw: &str) -> RenderedMessage {
    match AnomalyRecord::parse(raw) {
        Some(record) => render_anomaly(&record),
        None => render_fallback(raw),
    }
}

/// Rich message: Block Kit content inside one attachment colored by severity.
pub fn render_anomaly(record: &AnomalyRecord) -> RenderedMessage {
    let severity = Severity::classify(record.total_impact);

    let emoji = severity.emoji();
    let header = format!("{emoji} {HEADER_TITLE}: {severity} {emoji}");

    let detail = record
        .account()
        .as_ref()
        .and_then(detail_line)
        .map(TextObject::mrkdwn);

    let console_url = record
        .details_link
        .clone()
        .unwrap_or_else(|| DEFAULT_CONSOLE_URL.to_string());

    let blocks = vec![
        Block::header(header),
        Block::fields_section(detail, field_grid(record)),
        Block::actions(vec![Element::link_button(
            CONSOLE_BUTTON_LABEL,
            console_url,
            ButtonStyle::Primary,
        )]),
        Block::context(vec![TextObject::mrkdwn(FOOTER)]),
    ];

    RenderedMessage::Attachments {
        attachments: vec![Attachment {
            color: severity.color().to_string(),
            blocks,
        }],
    }
}

/// Fallback message embedding the raw text as a preformatted block.
pub fn render_fallback(raw: &str) -> RenderedMessage {
    RenderedMessage::Blocks {
        blocks: vec![
            Block::header(FALLBACK_HEADER),
            Block::text_section(TextObject::mrkdwn(format!("```{raw}```"))),
        ],
    }
}

fn field_grid(record: &AnomalyRecord) -> Vec<TextObject> {
    let mut fields = Vec::with_capacity(5);

    if record.start_date.is_some() || record.end_date.is_some() {
        fields.push(field(
            "Window",
            &format!(
                "{} → {}",
                or_dash(record.start_date.as_deref()),
                or_dash(record.end_date.as_deref()),
            ),
        ));
    }

    let impact = record
        .total_impact
        .map_or_else(|| "n/a".to_string(), |v| format!("${}", group_thousands(v)));
    fields.push(field("Estimated impact", &format!("{impact} USD")));

    let pct = record
        .total_impact_percentage
        .map_or_else(|| "n/a".to_string(), |v| format!("{}%", group_thousands(v)));
    fields.push(field("Impact %", &pct));

    if let Some(summary) = record.root_cause.as_ref().and_then(root_cause_summary) {
        fields.push(field("Root cause", &summary));
    }

    fields.push(field("Anomaly ID", &record.anomaly_id));

    fields
}

fn field(title: &str, value: &str) -> TextObject {
    TextObject::mrkdwn(format!("*{title}*\n{value}"))
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or("-")
}

/// `Service: X | Region: Y | Usage: Z`, listing only the parts present.
fn root_cause_summary(rc: &RootCause) -> Option<String> {
    let parts: Vec<String> = [
        ("Service", &rc.service),
        ("Region", &rc.region),
        ("Usage", &rc.usage_type),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}: {v}")))
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

fn detail_line(account: &AccountInfo) -> Option<String> {
    match (&account.name, account.id.is_empty()) {
        (Some(name), _) => Some(format!("{name} ({})", account.id)),
        (None, false) => Some(format!("Account: {}", account.id)),
        (None, true) => None,
    }
}

/// Two decimals with `,` thousands separators, e.g. `1234.5` → `1,234.50`.
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*digit));
    }

    format!("{sign}{grouped}.{frac_part}")
}
