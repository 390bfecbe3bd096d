//! Form engine - value types, validation, bindings and the step wizard

pub mod binding;
pub mod controller;
pub mod fields;
pub mod host;
pub mod preview;
pub mod registry;
pub mod summary;
pub mod validator;
pub mod wizard;

pub use binding::{CharCounter, FieldBinding, FieldMark, SecondaryControl};
pub use controller::{check_record, DraftError, FormError, FormOptions, SettingsFormController};
pub use fields::{Field, FieldSet, FieldValues};
pub use host::{NoticeLevel, Notifier, Silent, SinkError, SubmitSink};
pub use preview::{format_preview, LinkKind, Preview};
pub use registry::{Constraint, ValueTypeRegistry, WidgetDescriptor, WidgetKind};
pub use summary::Summary;
pub use validator::{parse_rule_list, FieldValidationError, Rule, RuleResult, Validator};
pub use wizard::{NavigationError, Step, StepValidator, SubmitBlocked, WizardStateMachine};
