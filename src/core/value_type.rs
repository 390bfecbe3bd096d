//! Value-type tags and setting categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Value type of a setting; selects its widget, rules and preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueTypeTag {
    /// Single line of text
    String,
    /// Multi-line text
    Text,
    Integer,
    Decimal,
    Boolean,
    Email,
    Url,
    /// Secret, never displayed
    Password,
    /// Hex color `#RRGGBB`
    Color,
    Date,
    Time,
    /// Structured JSON payload
    Json,
    FilePath,
    /// Comma-separated values
    List,
}

impl ValueTypeTag {
    /// Get the canonical tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTypeTag::String => "STRING",
            ValueTypeTag::Text => "TEXT",
            ValueTypeTag::Integer => "INTEGER",
            ValueTypeTag::Decimal => "DECIMAL",
            ValueTypeTag::Boolean => "BOOLEAN",
            ValueTypeTag::Email => "EMAIL",
            ValueTypeTag::Url => "URL",
            ValueTypeTag::Password => "PASSWORD",
            ValueTypeTag::Color => "COLOR",
            ValueTypeTag::Date => "DATE",
            ValueTypeTag::Time => "TIME",
            ValueTypeTag::Json => "JSON",
            ValueTypeTag::FilePath => "FILE_PATH",
            ValueTypeTag::List => "LIST",
        }
    }

    /// Human-readable label shown in selectors and the review summary
    pub fn label(&self) -> &'static str {
        match self {
            ValueTypeTag::String => "Text",
            ValueTypeTag::Text => "Long text",
            ValueTypeTag::Integer => "Whole number",
            ValueTypeTag::Decimal => "Decimal number",
            ValueTypeTag::Boolean => "Boolean",
            ValueTypeTag::Email => "Email",
            ValueTypeTag::Url => "URL",
            ValueTypeTag::Password => "Password",
            ValueTypeTag::Color => "Color",
            ValueTypeTag::Date => "Date",
            ValueTypeTag::Time => "Time",
            ValueTypeTag::Json => "JSON",
            ValueTypeTag::FilePath => "Path",
            ValueTypeTag::List => "List",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ValueTypeTag::String => "Plain character string",
            ValueTypeTag::Text => "Multi-line text",
            ValueTypeTag::Integer => "Whole number (e.g. 42, -10)",
            ValueTypeTag::Decimal => "Decimal number (e.g. 3.14, 19.6)",
            ValueTypeTag::Boolean => "True or false",
            ValueTypeTag::Email => "Valid email address",
            ValueTypeTag::Url => "Web address (e.g. https://example.com)",
            ValueTypeTag::Password => "Password (stored encrypted)",
            ValueTypeTag::Color => "Hex color (e.g. #FF0000)",
            ValueTypeTag::Date => "Date as YYYY-MM-DD",
            ValueTypeTag::Time => "Time as HH:MM",
            ValueTypeTag::Json => "Valid JSON document",
            ValueTypeTag::FilePath => "Path to a file or directory",
            ValueTypeTag::List => "Comma-separated list of values",
        }
    }

    /// Get all value types in selector order
    pub fn all() -> &'static [ValueTypeTag] {
        &[
            ValueTypeTag::String,
            ValueTypeTag::Text,
            ValueTypeTag::Integer,
            ValueTypeTag::Decimal,
            ValueTypeTag::Boolean,
            ValueTypeTag::Email,
            ValueTypeTag::Url,
            ValueTypeTag::Password,
            ValueTypeTag::Color,
            ValueTypeTag::Date,
            ValueTypeTag::Time,
            ValueTypeTag::Json,
            ValueTypeTag::FilePath,
            ValueTypeTag::List,
        ]
    }
}

impl fmt::Display for ValueTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for tag or category names that are not part of the closed set
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagParseError {
    #[error("Unknown value type: {0}")]
    UnknownValueType(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Normalize user spelling: case-insensitive, `-` and spaces read as `_`
fn normalize(s: &str) -> String {
    s.trim().to_uppercase().replace(['-', ' '], "_")
}

impl FromStr for ValueTypeTag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| TagParseError::UnknownValueType(s.to_string()))
    }
}

/// Functional grouping of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettingCategory {
    #[default]
    General,
    Company,
    Email,
    Invoice,
    Tax,
    Security,
    Notification,
    System,
    Integration,
    Appearance,
}

impl SettingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingCategory::General => "GENERAL",
            SettingCategory::Company => "COMPANY",
            SettingCategory::Email => "EMAIL",
            SettingCategory::Invoice => "INVOICE",
            SettingCategory::Tax => "TAX",
            SettingCategory::Security => "SECURITY",
            SettingCategory::Notification => "NOTIFICATION",
            SettingCategory::System => "SYSTEM",
            SettingCategory::Integration => "INTEGRATION",
            SettingCategory::Appearance => "APPEARANCE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingCategory::General => "General",
            SettingCategory::Company => "Company",
            SettingCategory::Email => "Email",
            SettingCategory::Invoice => "Invoicing",
            SettingCategory::Tax => "Taxes",
            SettingCategory::Security => "Security",
            SettingCategory::Notification => "Notifications",
            SettingCategory::System => "System",
            SettingCategory::Integration => "Integrations",
            SettingCategory::Appearance => "Appearance",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SettingCategory::General => "General application settings",
            SettingCategory::Company => "Company information",
            SettingCategory::Email => "Email delivery configuration",
            SettingCategory::Invoice => "Invoicing settings",
            SettingCategory::Tax => "Tax configuration",
            SettingCategory::Security => "Security settings",
            SettingCategory::Notification => "Notification management",
            SettingCategory::System => "Advanced system settings",
            SettingCategory::Integration => "Third-party integrations",
            SettingCategory::Appearance => "Interface customization",
        }
    }

    pub fn all() -> &'static [SettingCategory] {
        &[
            SettingCategory::General,
            SettingCategory::Company,
            SettingCategory::Email,
            SettingCategory::Invoice,
            SettingCategory::Tax,
            SettingCategory::Security,
            SettingCategory::Notification,
            SettingCategory::System,
            SettingCategory::Integration,
            SettingCategory::Appearance,
        ]
    }
}

impl fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SettingCategory {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::all()
            .iter()
            .copied()
            .find(|cat| cat.as_str() == wanted)
            .ok_or_else(|| TagParseError::UnknownCategory(s.to_string()))
    }
}
