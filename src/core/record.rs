//! The setting record edited by the form

use serde::{Deserialize, Serialize};

use crate::core::value_type::{SettingCategory, ValueTypeTag};

/// Fixed mask shown in place of secret values
pub const MASK: &str = "••••••••";

/// A typed key/value configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingRecord {
    /// Identifier, e.g. `mail.smtp.host`
    pub key: String,

    pub category: SettingCategory,

    pub value_type: ValueTypeTag,

    /// Raw string value, interpreted according to `value_type`
    pub value: String,

    pub description: String,

    pub sort_order: i32,

    /// System settings are managed by the application itself
    pub is_system: bool,

    /// Value is stored encrypted by the persistence layer
    pub is_encrypted: bool,
}

impl Default for SettingRecord {
    fn default() -> Self {
        Self {
            key: String::new(),
            category: SettingCategory::General,
            value_type: ValueTypeTag::String,
            value: String::new(),
            description: String::new(),
            sort_order: 0,
            is_system: false,
            is_encrypted: false,
        }
    }
}

impl SettingRecord {
    /// Create a record with a key and a string value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, value_type: ValueTypeTag) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn with_category(mut self, category: SettingCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Boolean interpretation; false for non-boolean types
    pub fn bool_value(&self) -> bool {
        self.value_type == ValueTypeTag::Boolean && self.value.trim().eq_ignore_ascii_case("true")
    }

    /// One-line value for listings
    pub fn display_value(&self) -> String {
        match self.value_type {
            ValueTypeTag::Password => MASK.to_string(),
            ValueTypeTag::Boolean => {
                if self.bool_value() {
                    "✓ Enabled".to_string()
                } else {
                    "✗ Disabled".to_string()
                }
            }
            ValueTypeTag::List => self
                .value
                .split(',')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(", "),
            ValueTypeTag::Json => truncate_chars(&self.value, 50),
            ValueTypeTag::Text => truncate_chars(&self.value, 100),
            _ => self.value.clone(),
        }
    }
}

/// Truncate to `max` characters, appending "..." when cut
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = SettingRecord::default();
        assert_eq!(record.category, SettingCategory::General);
        assert_eq!(record.value_type, ValueTypeTag::String);
        assert_eq!(record.sort_order, 0);
        assert!(!record.is_system);
    }

    #[test]
    fn test_display_value_masks_password() {
        let record = SettingRecord::new("smtp.password", "hunter2").with_type(ValueTypeTag::Password);
        assert_eq!(record.display_value(), MASK);
    }

    #[test]
    fn test_display_value_boolean_and_list() {
        let on = SettingRecord::new("feature.on", "TRUE").with_type(ValueTypeTag::Boolean);
        assert_eq!(on.display_value(), "✓ Enabled");
        let list = SettingRecord::new("langs", "fr,en , de").with_type(ValueTypeTag::List);
        assert_eq!(list.display_value(), "fr, en, de");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }

    #[test]
    fn test_yaml_shape() {
        let yaml = "key: app.name\ncategory: COMPANY\nvalue_type: STRING\nvalue: Acme\n";
        let record: SettingRecord = serde_yml::from_str(yaml).unwrap();
        assert_eq!(record.key, "app.name");
        assert_eq!(record.category, SettingCategory::Company);
        assert_eq!(record.description, "");
    }
}
