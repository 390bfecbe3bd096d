//! Live preview of a raw value, shaped by its value type

use serde::Serialize;

use crate::core::record::MASK;
use crate::core::value_type::ValueTypeTag;
use crate::form::validator::Rule;

/// Target of a preview link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Mail,
    Web,
}

/// Renderable preview of a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Preview {
    /// Nothing to show; hosts hide the preview area
    Empty,
    Redacted { mask: &'static str },
    Badge { enabled: bool, label: &'static str },
    Swatch { hex: String },
    Link {
        #[serde(rename = "link_kind")]
        kind: LinkKind,
        href: String,
        text: String,
    },
    Chips { items: Vec<String> },
    Json { pretty: String },
    /// Value does not parse; editing continues
    InvalidJson { message: String },
    /// Multi-line text, one entry per line
    Lines { lines: Vec<String> },
    Text { text: String },
}

impl Preview {
    /// Whether the preview marks malformed input
    pub fn is_invalid(&self) -> bool {
        matches!(self, Preview::InvalidJson { .. })
    }

    /// Plain-text form, used for logs and non-styled output
    pub fn plain(&self) -> String {
        match self {
            Preview::Empty => String::new(),
            Preview::Redacted { mask } => mask.to_string(),
            Preview::Badge { label, .. } => label.to_string(),
            Preview::Swatch { hex } => hex.clone(),
            Preview::Link { text, .. } => text.clone(),
            Preview::Chips { items } => items.join(" | "),
            Preview::Json { pretty } => pretty.clone(),
            Preview::InvalidJson { message } => format!("Invalid JSON: {}", message),
            Preview::Lines { lines } => lines.join("\n"),
            Preview::Text { text } => text.clone(),
        }
    }
}

/// Split a LIST value into trimmed, non-empty entries in order
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Build the preview for a value. `None` means the tag was not recognized.
pub fn format_preview(tag: Option<ValueTypeTag>, raw: &str) -> Preview {
    // Secrets are masked even when empty
    if tag == Some(ValueTypeTag::Password) {
        return Preview::Redacted { mask: MASK };
    }
    if raw.is_empty() {
        return Preview::Empty;
    }

    match tag {
        Some(ValueTypeTag::Boolean) => {
            let enabled = raw == "true";
            Preview::Badge {
                enabled,
                label: if enabled { "Enabled" } else { "Disabled" },
            }
        }
        // Swatches and links only carry values that pass their type's rule;
        // anything else lands in markup as plain text
        Some(ValueTypeTag::Color) if Rule::Color.check(raw) => {
            Preview::Swatch { hex: raw.to_string() }
        }
        Some(ValueTypeTag::Email) if Rule::Email.check(raw) => Preview::Link {
            kind: LinkKind::Mail,
            href: format!("mailto:{}", raw),
            text: raw.to_string(),
        },
        Some(ValueTypeTag::Url) if Rule::Url.check(raw) => Preview::Link {
            kind: LinkKind::Web,
            href: raw.to_string(),
            text: raw.to_string(),
        },
        Some(ValueTypeTag::List) => Preview::Chips { items: split_list(raw) },
        Some(ValueTypeTag::Json) => match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(pretty) => Preview::Json { pretty },
                Err(e) => Preview::InvalidJson { message: e.to_string() },
            },
            Err(e) => Preview::InvalidJson { message: e.to_string() },
        },
        Some(ValueTypeTag::Text) => Preview::Lines {
            lines: raw.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect(),
        },
        _ => Preview::Text { text: raw.to_string() },
    }
}
