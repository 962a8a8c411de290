//! Typed Slack Block Kit structures.
//!
//! Only the subset of Block Kit the notifier emits is modelled. Every type
//! serializes to the exact JSON shape Slack's incoming webhooks accept, with
//! the `type` discriminator first and optional members omitted when unset.

use serde::Serialize;

/// A Block Kit text object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        emoji: Option<bool>,
    },
    Mrkdwn {
        text: String,
    },
}

impl TextObject {
    /// Plain text without an explicit `emoji` flag.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText {
            text: text.into(),
            emoji: None,
        }
    }

    /// Plain text with `emoji: true`, so shortcodes render as glyphs.
    pub fn plain_with_emoji(text: impl Into<String>) -> Self {
        Self::PlainText {
            text: text.into(),
            emoji: Some(true),
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }

    /// The raw text regardless of formatting kind.
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText { text, .. } | Self::Mrkdwn { text } => text,
        }
    }
}

/// Visual style of a button element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
}

/// An interactive element placed inside an actions block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button {
        text: TextObject,
        url: String,
        style: ButtonStyle,
    },
}

impl Element {
    /// A button that opens `url` when clicked.
    pub fn link_button(label: impl Into<String>, url: impl Into<String>, style: ButtonStyle) -> Self {
        Self::Button {
            text: TextObject::plain(label),
            url: url.into(),
            style,
        }
    }
}

/// A top-level layout block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: TextObject,
    },
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<TextObject>,
    },
    Actions {
        elements: Vec<Element>,
    },
    Context {
        elements: Vec<TextObject>,
    },
}

impl Block {
    /// Header block; headers are always plain text with emoji enabled.
    pub fn header(text: impl Into<String>) -> Self {
        Self::Header {
            text: TextObject::plain_with_emoji(text),
        }
    }

    /// Section with a primary text and no fields.
    pub fn text_section(text: TextObject) -> Self {
        Self::Section {
            text: Some(text),
            fields: Vec::new(),
        }
    }

    /// Section with an optional primary text and a field grid.
    pub fn fields_section(text: Option<TextObject>, fields: Vec<TextObject>) -> Self {
        Self::Section { text, fields }
    }

    pub fn actions(elements: Vec<Element>) -> Self {
        Self::Actions { elements }
    }

    pub fn context(elements: Vec<TextObject>) -> Self {
        Self::Context { elements }
    }
}

/// A legacy attachment, used here only for its colored side bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    /// Hex color of the side bar, e.g. `#C62828`.
    pub color: String,
    pub blocks: Vec<Block>,
}

/// The JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderedMessage {
    /// Rich anomaly message: blocks wrapped in one colored attachment.
    Attachments { attachments: Vec<Attachment> },
    /// Plain block list with no color bar.
    Blocks { blocks: Vec<Block> },
}

impl RenderedMessage {
    /// All blocks of the message, flattened across attachments.
    pub fn blocks(&self) -> Vec<&Block> {
        match self {
            Self::Attachments { attachments } => {
                attachments.iter().flat_map(|a| a.blocks.iter()).collect()
            }
            Self::Blocks { blocks } => blocks.iter().collect(),
        }
    }

    /// Color of the first attachment, if the message has one.
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Attachments { attachments } => attachments.first().map(|a| a.color.as_str()),
            Self::Blocks { .. } => None,
        }
    }
}
