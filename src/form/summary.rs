//! Review-step summary derived from the draft

use serde::Serialize;

use crate::core::record::{truncate_chars, MASK};
use crate::core::value_type::{SettingCategory, ValueTypeTag};
use crate::form::fields::{Field, FieldSet};

/// Placeholder for empty entries
pub const EMPTY_ENTRY: &str = "-";

/// Read-model shown on the review step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub key: String,
    pub category: String,
    pub value_type: String,
    pub value: String,
    pub description: String,
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        EMPTY_ENTRY.to_string()
    } else {
        s.to_string()
    }
}

impl Summary {
    /// Build from the current field values. Values longer than `limit`
    /// characters are cut; PASSWORD values are always masked.
    pub fn build(fields: &FieldSet, limit: usize) -> Self {
        let type_name = fields.read(Field::ValueType);
        let tag = type_name.parse::<ValueTypeTag>().ok();

        let category = match fields.read(Field::Category).parse::<SettingCategory>() {
            Ok(cat) => cat.label().to_string(),
            Err(_) => or_dash(fields.read(Field::Category)),
        };
        let value_type = match tag {
            Some(tag) => tag.label().to_string(),
            None => or_dash(type_name),
        };
        let value = if tag == Some(ValueTypeTag::Password) {
            MASK.to_string()
        } else {
            or_dash(&truncate_chars(fields.read(Field::Value), limit))
        };

        Self {
            key: or_dash(fields.read(Field::Key)),
            category,
            value_type,
            value,
            description: or_dash(fields.read(Field::Description)),
        }
    }

    /// Label/value pairs in display order
    pub fn rows(&self) -> [(&'static str, &str); 5] {
        [
            (Field::Key.label(), self.key.as_str()),
            (Field::Category.label(), self.category.as_str()),
            (Field::ValueType.label(), self.value_type.as_str()),
            (Field::Value.label(), self.value.as_str()),
            (Field::Description.label(), self.description.as_str()),
        ]
    }
}
