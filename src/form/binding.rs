//! Field bindings: one logical field, its canonical value and its mark

use crate::form::validator::{FieldValidationError, Rule, Validator};

/// Valid/invalid presentation of a field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldMark {
    #[default]
    Clear,
    Valid,
    Invalid(String),
}

/// Paired control that mirrors the canonical value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryControl {
    Checkbox(bool),
    ColorWheel(String),
}

/// Character counter for length-limited fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    pub length: usize,
    pub max: usize,
}

impl CharCounter {
    /// Past 90% of the limit
    pub fn is_warning(&self) -> bool {
        self.length * 10 > self.max * 9
    }
}

impl std::fmt::Display for CharCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.length, self.max)
    }
}

/// Binds a field name to its widget state
#[derive(Debug, Clone)]
pub struct FieldBinding {
    name: &'static str,
    label: &'static str,
    value: String,
    rules: Vec<Rule>,
    secondary: Option<SecondaryControl>,
    mark: FieldMark,
    max_length: Option<usize>,
}

impl FieldBinding {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: String::new(),
            rules: Vec::new(),
            secondary: None,
            mark: FieldMark::Clear,
            max_length: None,
        }
    }

    pub fn with_rules(mut self, rules: &[Rule]) -> Self {
        self.rules = rules.to_vec();
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    pub fn mark(&self) -> &FieldMark {
        &self.mark
    }

    pub fn secondary(&self) -> Option<&SecondaryControl> {
        self.secondary.as_ref()
    }

    /// Current canonical value
    pub fn read(&self) -> &str {
        &self.value
    }

    /// Write the canonical value, mirroring it into the secondary control
    pub fn write(&mut self, value: impl Into<String>) {
        self.value = value.into();
        match &mut self.secondary {
            Some(SecondaryControl::Checkbox(checked)) => *checked = self.value == "true",
            Some(SecondaryControl::ColorWheel(color)) => {
                if !self.value.is_empty() && Rule::Color.check(&self.value) {
                    *color = self.value.clone();
                }
            }
            None => {}
        }
    }

    /// Attach a checkbox; the canonical value becomes `true` or `false`
    pub fn attach_checkbox(&mut self) {
        let checked = self.value == "true";
        self.secondary = Some(SecondaryControl::Checkbox(checked));
        self.value = checked.to_string();
    }

    /// Attach a color wheel, seeding an empty value with `default_color`
    pub fn attach_color_wheel(&mut self, default_color: &str) {
        if self.value.is_empty() {
            self.value = default_color.to_string();
        }
        self.secondary = Some(SecondaryControl::ColorWheel(self.value.clone()));
    }

    pub fn detach_secondary(&mut self) {
        self.secondary = None;
    }

    /// Change made through the checkbox
    pub fn toggle(&mut self, checked: bool) -> bool {
        match &mut self.secondary {
            Some(SecondaryControl::Checkbox(state)) => {
                *state = checked;
                self.value = checked.to_string();
                true
            }
            _ => false,
        }
    }

    /// Change made through the color wheel
    pub fn pick_color(&mut self, hex: &str) -> bool {
        match &mut self.secondary {
            Some(SecondaryControl::ColorWheel(color)) => {
                *color = hex.to_string();
                self.value = hex.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn mark_valid(&mut self) {
        self.mark = FieldMark::Valid;
    }

    pub fn mark_invalid(&mut self, message: impl Into<String>) {
        self.mark = FieldMark::Invalid(message.into());
    }

    pub fn clear_mark(&mut self) {
        self.mark = FieldMark::Clear;
    }

    /// Run the field's rules and update its mark
    pub fn validate(&mut self) -> Result<(), FieldValidationError> {
        match Validator::evaluate_with_limit(
            self.name,
            self.label,
            &self.rules,
            self.max_length,
            &self.value,
        ) {
            Ok(()) => {
                self.mark_valid();
                Ok(())
            }
            Err(e) => {
                self.mark_invalid(e.message.clone());
                Err(e)
            }
        }
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn counter(&self) -> Option<CharCounter> {
        self.max_length.map(|max| CharCounter {
            length: self.value.chars().count(),
            max,
        })
    }
}
