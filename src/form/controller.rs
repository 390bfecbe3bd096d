//! Settings form controller: owns the draft and wires the engine together

use miette::Diagnostic;
use thiserror::Error;

use crate::core::record::SettingRecord;
use crate::core::value_type::{SettingCategory, ValueTypeTag};
use crate::form::binding::FieldBinding;
use crate::form::fields::{Field, FieldSet, FieldValues};
use crate::form::host::{NoticeLevel, Notifier, Silent, SinkError, SubmitSink};
use crate::form::preview::Preview;
use crate::form::registry::{ValueTypeRegistry, WidgetDescriptor, WidgetKind};
use crate::form::summary::Summary;
use crate::form::validator::{FieldValidationError, Rule};
use crate::form::wizard::{NavigationError, Step, SubmitBlocked, WizardStateMachine};

/// Per-form tunables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    /// Characters of the value shown in the summary
    pub summary_limit: usize,
    /// Seed for an empty COLOR widget
    pub default_color: String,
    /// Prefix the value rules with `required`
    pub require_value: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            summary_limit: 50,
            default_color: "#0d6efd".to_string(),
            require_value: false,
        }
    }
}

/// The draft cannot be turned into a record
#[derive(Debug, Error, Diagnostic)]
pub enum DraftError {
    #[error("Sort order '{0}' is not a valid 32-bit integer")]
    #[diagnostic(code(setwiz::form::draft))]
    SortOrder(String),
}

/// Failure of `handle_submit`
#[derive(Debug, Error, Diagnostic)]
pub enum FormError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Blocked(#[from] SubmitBlocked),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sink(#[from] SinkError),
}

/// One form instance: draft, wizard, snapshot and derived views
pub struct SettingsFormController<S: SubmitSink, N: Notifier> {
    registry: ValueTypeRegistry,
    fields: FieldSet,
    wizard: WizardStateMachine,
    original: FieldValues,
    descriptor: &'static WidgetDescriptor,
    preview: Preview,
    summary: Summary,
    options: FormOptions,
    sink: S,
    notifier: N,
}

impl<S: SubmitSink, N: Notifier> SettingsFormController<S, N> {
    /// Form for a new record, seeded with defaults
    pub fn create(options: FormOptions, sink: S, notifier: N) -> Self {
        Self::edit(&SettingRecord::default(), options, sink, notifier)
    }

    /// Form seeded from an existing record
    pub fn edit(record: &SettingRecord, options: FormOptions, sink: S, notifier: N) -> Self {
        let registry = ValueTypeRegistry::new();
        let fields = FieldSet::seeded(record);
        let mut controller = Self {
            registry,
            descriptor: registry.describe(record.value_type),
            fields,
            wizard: WizardStateMachine::new(),
            original: FieldValues::new(),
            preview: Preview::Empty,
            summary: Summary::default(),
            options,
            sink,
            notifier,
        };
        controller.update_value_input();
        // Taken after the first widget build so reset reproduces it exactly
        controller.original = controller.fields.values();
        tracing::debug!(key = %record.key, value_type = %record.value_type, "form loaded");
        controller
    }

    // ---- read access ------------------------------------------------------

    pub fn field(&self, field: Field) -> &FieldBinding {
        self.fields.get(field)
    }

    pub fn current_step(&self) -> Step {
        self.wizard.current()
    }

    pub fn descriptor(&self) -> &'static WidgetDescriptor {
        self.descriptor
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Errors of the last submit attempt
    pub fn errors(&self) -> &[FieldValidationError] {
        self.wizard.errors()
    }

    /// Values captured at load time
    pub fn original_values(&self) -> &FieldValues {
        &self.original
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // ---- input events -----------------------------------------------------

    /// Text typed or selected into a field
    pub fn on_input(&mut self, field: Field, value: &str) {
        self.fields.get_mut(field).write(value);
        if field == Field::ValueType {
            self.update_value_input();
        } else {
            self.after_change(field);
        }
    }

    /// Checkbox of a BOOLEAN value widget changed
    pub fn on_toggle(&mut self, checked: bool) {
        if self.fields.get_mut(Field::Value).toggle(checked) {
            self.after_change(Field::Value);
        }
    }

    /// Color wheel of a COLOR value widget changed
    pub fn on_color_pick(&mut self, hex: &str) {
        if self.fields.get_mut(Field::Value).pick_color(hex) {
            self.after_change(Field::Value);
        }
    }

    fn after_change(&mut self, field: Field) {
        let binding = self.fields.get_mut(field);
        if !binding.rules().is_empty() || binding.max_length().is_some() {
            // The mark carries the outcome
            let _ = binding.validate();
        }
        self.refresh();
    }

    /// Re-render preview and summary from the draft
    fn refresh(&mut self) {
        self.preview = self.registry.preview_name(
            self.fields.read(Field::ValueType),
            self.fields.read(Field::Value),
        );
        self.summary = Summary::build(&self.fields, self.options.summary_limit);
    }

    // ---- host operations --------------------------------------------------

    /// Rebuild the value widget for the current value type
    pub fn update_value_input(&mut self) {
        self.descriptor = self.registry.describe_name(self.fields.read(Field::ValueType));

        let mut rules = Vec::with_capacity(self.descriptor.rules.len() + 1);
        if self.options.require_value {
            rules.push(Rule::Required);
        }
        rules.extend_from_slice(self.descriptor.rules);

        let value = self.fields.get_mut(Field::Value);
        value.set_rules(rules);
        value.detach_secondary();
        match self.descriptor.kind {
            WidgetKind::Toggle => value.attach_checkbox(),
            WidgetKind::ColorPicker => value.attach_color_wheel(&self.options.default_color),
            _ => {}
        }
        value.clear_mark();

        tracing::debug!(
            kind = self.descriptor.kind.as_str(),
            rules = ?self.descriptor.rule_names(),
            "value widget rebuilt"
        );
        self.refresh();
    }

    pub fn next_step(&mut self) -> Result<Step, NavigationError> {
        let step = self.wizard.next(&mut self.fields)?;
        self.on_step_entered(step);
        Ok(step)
    }

    pub fn previous_step(&mut self) -> Result<Step, NavigationError> {
        let step = self.wizard.previous(&mut self.fields)?;
        self.on_step_entered(step);
        Ok(step)
    }

    pub fn go_to_step(&mut self, target: i32) -> Result<Step, NavigationError> {
        let step = self.wizard.go_to(target, &mut self.fields)?;
        self.on_step_entered(step);
        Ok(step)
    }

    fn on_step_entered(&mut self, step: Step) {
        if step == Step::Review {
            self.refresh();
        }
    }

    /// Restore load-time values and return to step 1
    pub fn reset_form(&mut self) {
        for (field, value) in &self.original {
            self.fields.get_mut(*field).write(value.as_str());
        }
        self.update_value_input();
        self.fields.clear_marks();
        self.wizard.reset();
        self.notifier
            .notify(NoticeLevel::Info, "Form reset to its original values");
    }

    /// Validate every step and hand the record to the submit sink
    pub fn handle_submit(&mut self) -> Result<SettingRecord, FormError> {
        if let Err(blocked) = self.wizard.submit(&mut self.fields) {
            let lines: Vec<String> = blocked.errors.iter().map(|e| e.to_string()).collect();
            self.notifier.notify(
                NoticeLevel::Error,
                &format!("Please fix the following errors:\n{}", lines.join("\n")),
            );
            return Err(blocked.into());
        }

        let record = match self.draft() {
            Ok(record) => record,
            Err(e) => {
                self.notifier.notify(NoticeLevel::Error, &e.to_string());
                return Err(e.into());
            }
        };

        if let Err(e) = self.sink.submit(&record) {
            self.notifier.notify(NoticeLevel::Error, &e.to_string());
            return Err(e.into());
        }

        tracing::debug!(key = %record.key, "setting submitted");
        self.notifier.notify(NoticeLevel::Success, "Setting saved");
        Ok(record)
    }

    /// Record built from the current field values
    pub fn draft(&self) -> Result<SettingRecord, DraftError> {
        let category = self
            .fields
            .read(Field::Category)
            .parse::<SettingCategory>()
            .unwrap_or_else(|_| {
                tracing::warn!(category = self.fields.read(Field::Category), "unknown category, using GENERAL");
                SettingCategory::General
            });
        let value_type = self
            .fields
            .read(Field::ValueType)
            .parse::<ValueTypeTag>()
            .unwrap_or(ValueTypeTag::String);

        let sort_raw = self.fields.read(Field::SortOrder).trim();
        let sort_order = if sort_raw.is_empty() {
            0
        } else {
            sort_raw
                .parse::<i32>()
                .map_err(|_| DraftError::SortOrder(sort_raw.to_string()))?
        };

        Ok(SettingRecord {
            key: self.fields.read(Field::Key).to_string(),
            category,
            value_type,
            value: self.fields.read(Field::Value).to_string(),
            description: self.fields.read(Field::Description).to_string(),
            sort_order,
            is_system: self.fields.read(Field::IsSystem) == "true",
            is_encrypted: self.fields.read(Field::IsEncrypted) == "true",
        })
    }
}

/// Run every step's rules over a record without a host, in field order
pub fn check_record(record: &SettingRecord, options: &FormOptions) -> Vec<FieldValidationError> {
    let sink: Vec<SettingRecord> = Vec::new();
    let mut form = SettingsFormController::edit(record, options.clone(), sink, Silent);
    match form.wizard.submit(&mut form.fields) {
        Ok(()) => Vec::new(),
        Err(blocked) => blocked.errors,
    }
}
