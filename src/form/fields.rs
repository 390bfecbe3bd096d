//! The tracked fields of a setting form

use std::collections::BTreeMap;
use std::fmt;

use crate::core::record::SettingRecord;
use crate::form::binding::FieldBinding;
use crate::form::validator::{FieldValidationError, Rule};
use crate::form::wizard::{Step, StepValidator};

/// Maximum key length; longer keys fail validation
pub const KEY_MAX_LENGTH: usize = 100;
/// Maximum description length; longer descriptions fail validation
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

/// Fields of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Key,
    Category,
    ValueType,
    Value,
    Description,
    SortOrder,
    IsSystem,
    IsEncrypted,
}

impl Field {
    /// Host-side field name
    pub fn name(&self) -> &'static str {
        match self {
            Field::Key => "key",
            Field::Category => "category",
            Field::ValueType => "valueType",
            Field::Value => "value",
            Field::Description => "description",
            Field::SortOrder => "sortOrder",
            Field::IsSystem => "isSystem",
            Field::IsEncrypted => "isEncrypted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Key => "Key",
            Field::Category => "Category",
            Field::ValueType => "Value type",
            Field::Value => "Value",
            Field::Description => "Description",
            Field::SortOrder => "Sort order",
            Field::IsSystem => "System setting",
            Field::IsEncrypted => "Encrypted",
        }
    }

    pub fn all() -> &'static [Field] {
        &[
            Field::Key,
            Field::Category,
            Field::ValueType,
            Field::Value,
            Field::Description,
            Field::SortOrder,
            Field::IsSystem,
            Field::IsEncrypted,
        ]
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }

    /// Rules that do not depend on the value type
    fn base_rules(&self) -> &'static [Rule] {
        match self {
            Field::Key => &[Rule::Required, Rule::KeyFormat],
            Field::Category => &[Rule::Required, Rule::Category],
            Field::ValueType => &[Rule::Required, Rule::ValueType],
            Field::SortOrder => &[Rule::Integer],
            _ => &[],
        }
    }

    fn max_length(&self) -> Option<usize> {
        match self {
            Field::Key => Some(KEY_MAX_LENGTH),
            Field::Description => Some(DESCRIPTION_MAX_LENGTH),
            _ => None,
        }
    }

    /// Canonical string form of this field in a record
    pub fn read_from(&self, record: &SettingRecord) -> String {
        match self {
            Field::Key => record.key.clone(),
            Field::Category => record.category.as_str().to_string(),
            Field::ValueType => record.value_type.as_str().to_string(),
            Field::Value => record.value.clone(),
            Field::Description => record.description.clone(),
            Field::SortOrder => record.sort_order.to_string(),
            Field::IsSystem => record.is_system.to_string(),
            Field::IsEncrypted => record.is_encrypted.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of every tracked field's value
pub type FieldValues = BTreeMap<Field, String>;

/// All bindings of one form instance, indexed by `Field`
#[derive(Debug, Clone)]
pub struct FieldSet {
    bindings: Vec<FieldBinding>,
}

impl FieldSet {
    /// Bindings with base rules and limits, seeded from a record
    pub fn seeded(record: &SettingRecord) -> Self {
        let bindings = Field::all()
            .iter()
            .map(|field| {
                let mut binding =
                    FieldBinding::new(field.name(), field.label()).with_rules(field.base_rules());
                if let Some(max) = field.max_length() {
                    binding = binding.with_max_length(max);
                }
                binding.write(field.read_from(record));
                binding
            })
            .collect();
        Self { bindings }
    }

    pub fn get(&self, field: Field) -> &FieldBinding {
        &self.bindings[field as usize]
    }

    pub fn get_mut(&mut self, field: Field) -> &mut FieldBinding {
        &mut self.bindings[field as usize]
    }

    pub fn read(&self, field: Field) -> &str {
        self.get(field).read()
    }

    pub fn values(&self) -> FieldValues {
        Field::all()
            .iter()
            .map(|field| (*field, self.read(*field).to_string()))
            .collect()
    }

    pub fn clear_marks(&mut self) {
        for binding in &mut self.bindings {
            binding.clear_mark();
        }
    }
}

impl StepValidator for FieldSet {
    fn validate_step(&mut self, step: Step) -> Vec<FieldValidationError> {
        step.fields()
            .iter()
            .filter_map(|field| self.get_mut(*field).validate().err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value_type::ValueTypeTag;

    #[test]
    fn test_seeded_from_record() {
        let mut record = SettingRecord::new("ui.theme", "#112233").with_type(ValueTypeTag::Color);
        record.sort_order = 7;
        record.is_encrypted = true;
        let fields = FieldSet::seeded(&record);

        assert_eq!(fields.read(Field::Key), "ui.theme");
        assert_eq!(fields.read(Field::ValueType), "COLOR");
        assert_eq!(fields.read(Field::SortOrder), "7");
        assert_eq!(fields.read(Field::IsEncrypted), "true");
        assert_eq!(fields.get(Field::Key).counter().unwrap().max, KEY_MAX_LENGTH);
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in Field::all() {
            assert_eq!(Field::from_name(field.name()), Some(*field));
        }
        assert_eq!(Field::from_name("nope"), None);
    }

    #[test]
    fn test_validate_step_reports_every_failing_field() {
        let mut fields = FieldSet::seeded(&SettingRecord::default());
        fields.get_mut(Field::Category).write("");
        let errors = fields.validate_step(Step::Identity);

        let names: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(names, vec!["key", "category"]);
    }
}
