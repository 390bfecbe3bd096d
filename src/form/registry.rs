//! Value-type registry: tag → widget descriptor, rules and preview

use serde::Serialize;

use crate::core::record::MASK;
use crate::core::value_type::ValueTypeTag;
use crate::form::preview::{format_preview, Preview};
use crate::form::validator::Rule;

/// Kind of input control, independent of rendering technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    SingleLine,
    MultiLine,
    Number,
    /// Checkbox toggle backed by a `true`/`false` canonical value
    Toggle,
    /// Color wheel plus swatch backed by a `#RRGGBB` canonical value
    ColorPicker,
    Date,
    Time,
    Masked,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::SingleLine => "single-line",
            WidgetKind::MultiLine => "multi-line",
            WidgetKind::Number => "number",
            WidgetKind::Toggle => "toggle",
            WidgetKind::ColorPicker => "color-picker",
            WidgetKind::Date => "date",
            WidgetKind::Time => "time",
            WidgetKind::Masked => "masked",
        }
    }
}

/// Extra host-level constraint on an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name", content = "value", rename_all = "lowercase")]
pub enum Constraint {
    /// Numeric step, e.g. `0.01`
    Step(&'static str),
    /// Visible rows of a multi-line input
    Rows(u8),
}

impl Constraint {
    /// Attribute name and value as a host would apply them
    pub fn attribute(&self) -> (&'static str, String) {
        match self {
            Constraint::Step(step) => ("step", step.to_string()),
            Constraint::Rows(rows) => ("rows", rows.to_string()),
        }
    }
}

/// Declarative description of the value input for one value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDescriptor {
    /// None for the fallback descriptor
    pub tag: Option<ValueTypeTag>,
    pub kind: WidgetKind,
    /// Host input type hint (`text`, `email`, `textarea`, ...)
    pub input_type: &'static str,
    pub placeholder: &'static str,
    pub help: &'static str,
    pub constraints: &'static [Constraint],
    #[serde(serialize_with = "serialize_rules")]
    pub rules: &'static [Rule],
}

fn serialize_rules<S: serde::Serializer>(rules: &&'static [Rule], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(rules.iter().map(Rule::name))
}

impl WidgetDescriptor {
    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Whether the widget carries a secondary control
    pub fn has_secondary(&self) -> bool {
        matches!(self.kind, WidgetKind::Toggle | WidgetKind::ColorPicker)
    }
}

const fn widget(
    tag: ValueTypeTag,
    kind: WidgetKind,
    input_type: &'static str,
    placeholder: &'static str,
    help: &'static str,
    constraints: &'static [Constraint],
    rules: &'static [Rule],
) -> WidgetDescriptor {
    WidgetDescriptor {
        tag: Some(tag),
        kind,
        input_type,
        placeholder,
        help,
        constraints,
        rules,
    }
}

/// One entry per tag, in `ValueTypeTag::all()` order
static DESCRIPTORS: [WidgetDescriptor; 14] = [
    widget(ValueTypeTag::String, WidgetKind::SingleLine, "text", "Plain text",
        "Enter plain text", &[], &[]),
    widget(ValueTypeTag::Text, WidgetKind::MultiLine, "textarea", "Multi-line text",
        "Enter text over several lines", &[Constraint::Rows(3)], &[]),
    widget(ValueTypeTag::Integer, WidgetKind::Number, "number", "123",
        "Enter a whole number (e.g. 42, -10)", &[], &[Rule::Integer]),
    widget(ValueTypeTag::Decimal, WidgetKind::Number, "number", "3.14",
        "Enter a decimal number (e.g. 3.14, 19.6)", &[Constraint::Step("0.01")], &[Rule::Decimal]),
    widget(ValueTypeTag::Boolean, WidgetKind::Toggle, "checkbox", "",
        "Check to enable (true) or uncheck to disable (false)", &[], &[]),
    widget(ValueTypeTag::Email, WidgetKind::SingleLine, "email", "example@domain.com",
        "Enter a valid email address", &[], &[Rule::Email]),
    widget(ValueTypeTag::Url, WidgetKind::SingleLine, "url", "https://example.com",
        "Enter a full URL (with http:// or https://)", &[], &[Rule::Url]),
    widget(ValueTypeTag::Password, WidgetKind::Masked, "password", MASK,
        "Enter a password (stored encrypted)", &[], &[]),
    widget(ValueTypeTag::Color, WidgetKind::ColorPicker, "color", "#FF0000",
        "Pick a color or type its hex code", &[], &[Rule::Color]),
    widget(ValueTypeTag::Date, WidgetKind::Date, "date", "",
        "Select a date", &[], &[]),
    widget(ValueTypeTag::Time, WidgetKind::Time, "time", "",
        "Select a time", &[], &[]),
    widget(ValueTypeTag::Json, WidgetKind::MultiLine, "textarea", r#"{"key": "value"}"#,
        "Enter a valid JSON document", &[Constraint::Rows(4)], &[Rule::Json]),
    widget(ValueTypeTag::FilePath, WidgetKind::SingleLine, "text", "/path/to/file",
        "Enter the path to a file or directory", &[], &[]),
    widget(ValueTypeTag::List, WidgetKind::MultiLine, "textarea", "value1, value2, value3",
        "Enter values separated by commas", &[Constraint::Rows(3)], &[]),
];

static FALLBACK: WidgetDescriptor = WidgetDescriptor {
    tag: None,
    kind: WidgetKind::SingleLine,
    input_type: "text",
    placeholder: "Value",
    help: "Enter the value",
    constraints: &[],
    rules: &[],
};

/// Pure lookup from value type to widget, rules and preview
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueTypeRegistry;

impl ValueTypeRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Descriptor for a tag
    pub fn describe(&self, tag: ValueTypeTag) -> &'static WidgetDescriptor {
        DESCRIPTORS
            .iter()
            .find(|d| d.tag == Some(tag))
            .unwrap_or(&FALLBACK)
    }

    /// Descriptor for a tag name as typed in a form; unknown names get a plain-text widget
    pub fn describe_name(&self, name: &str) -> &'static WidgetDescriptor {
        match name.parse::<ValueTypeTag>() {
            Ok(tag) => self.describe(tag),
            Err(_) => {
                tracing::warn!(value_type = name, "unknown value type, using plain-text widget");
                &FALLBACK
            }
        }
    }

    /// Ordered rules for a tag
    pub fn rules(&self, tag: ValueTypeTag) -> &'static [Rule] {
        self.describe(tag).rules
    }

    /// Preview of a raw value for a tag
    pub fn preview(&self, tag: ValueTypeTag, raw: &str) -> Preview {
        format_preview(Some(tag), raw)
    }

    /// Preview for a tag name; unknown names get the generic text preview
    pub fn preview_name(&self, name: &str, raw: &str) -> Preview {
        format_preview(name.parse::<ValueTypeTag>().ok(), raw)
    }
}
