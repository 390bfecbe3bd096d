//! Step-gated wizard state machine
//!
//! The wizard owns the current step and refuses forward navigation until
//! every earlier step validates. Submission requires every step to validate.

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

use crate::form::fields::Field;
use crate::form::validator::FieldValidationError;

/// Number of wizard steps
pub const STEP_COUNT: u8 = 3;

/// A page of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Key, category and value type
    Identity = 1,
    /// Value and its metadata
    Value = 2,
    /// Read-only summary
    Review = 3,
}

impl Step {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::Identity),
            2 => Some(Step::Value),
            3 => Some(Step::Review),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Identity => "Identity",
            Step::Value => "Value",
            Step::Review => "Review",
        }
    }

    /// Fields rendered (and validated) by this step
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Step::Identity => &[Field::Key, Field::Category, Field::ValueType],
            Step::Value => &[
                Field::Value,
                Field::Description,
                Field::SortOrder,
                Field::IsSystem,
                Field::IsEncrypted,
            ],
            Step::Review => &[],
        }
    }

    pub fn all() -> &'static [Step] {
        &[Step::Identity, Step::Value, Step::Review]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

/// Validates the fields owned by a step, marking them as it goes
pub trait StepValidator {
    /// Errors of every failing field of `step`, in field order
    fn validate_step(&mut self, step: Step) -> Vec<FieldValidationError>;
}

/// A rejected step transition; the current step is unchanged
#[derive(Debug, Error, Diagnostic)]
pub enum NavigationError {
    #[error("Step {target} does not exist (1-{max})")]
    #[diagnostic(code(setwiz::wizard::out_of_range))]
    OutOfRange { target: i32, max: u8 },

    #[error("Cannot open step {target}: step {blocked_at} has invalid fields")]
    #[diagnostic(code(setwiz::wizard::blocked), help("Fix the highlighted fields first"))]
    Blocked {
        target: u8,
        blocked_at: Step,
        #[related]
        errors: Vec<FieldValidationError>,
    },
}

/// Submission refused because at least one step is invalid
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{} field(s) need attention", .errors.len())]
#[diagnostic(code(setwiz::form::submit_blocked))]
pub struct SubmitBlocked {
    #[related]
    pub errors: Vec<FieldValidationError>,
}

/// Current step plus the errors of the last submit attempt
#[derive(Debug, Clone)]
pub struct WizardStateMachine {
    current: Step,
    errors: Vec<FieldValidationError>,
}

impl Default for WizardStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardStateMachine {
    pub fn new() -> Self {
        Self {
            current: Step::Identity,
            errors: Vec::new(),
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Errors collected by the last `submit`
    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    /// Navigate to `target`. Moving forward requires steps `1..target` to validate.
    pub fn go_to(
        &mut self,
        target: i32,
        form: &mut impl StepValidator,
    ) -> Result<Step, NavigationError> {
        let step = u8::try_from(target)
            .ok()
            .and_then(Step::from_number)
            .ok_or(NavigationError::OutOfRange {
                target,
                max: STEP_COUNT,
            })?;

        if step > self.current {
            for earlier in Step::all().iter().filter(|s| **s < step) {
                let errors = form.validate_step(*earlier);
                if !errors.is_empty() {
                    tracing::debug!(
                        to_step = step.number(),
                        blocked_at = earlier.number(),
                        "navigation blocked"
                    );
                    return Err(NavigationError::Blocked {
                        target: step.number(),
                        blocked_at: *earlier,
                        errors,
                    });
                }
            }
        }

        tracing::debug!(from_step = self.current.number(), to_step = step.number(), "step change");
        self.current = step;
        Ok(step)
    }

    /// Advance one step once the current step validates
    pub fn next(&mut self, form: &mut impl StepValidator) -> Result<Step, NavigationError> {
        let target = i32::from(self.current.number()) + 1;
        if target > i32::from(STEP_COUNT) {
            return Err(NavigationError::OutOfRange {
                target,
                max: STEP_COUNT,
            });
        }
        let errors = form.validate_step(self.current);
        if !errors.is_empty() {
            return Err(NavigationError::Blocked {
                target: target as u8,
                blocked_at: self.current,
                errors,
            });
        }
        self.go_to(target, form)
    }

    /// Go back one step; never validates
    pub fn previous(&mut self, form: &mut impl StepValidator) -> Result<Step, NavigationError> {
        self.go_to(i32::from(self.current.number()) - 1, form)
    }

    /// Validate every step; on success the error list is cleared
    pub fn submit(&mut self, form: &mut impl StepValidator) -> Result<(), SubmitBlocked> {
        let errors: Vec<FieldValidationError> = Step::all()
            .iter()
            .flat_map(|step| form.validate_step(*step))
            .collect();

        if errors.is_empty() {
            self.errors.clear();
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "submit blocked");
            self.errors = errors.clone();
            Err(SubmitBlocked { errors })
        }
    }

    /// Back to step 1 with no errors
    pub fn reset(&mut self) {
        self.current = Step::Identity;
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Form stub where listed steps fail
    #[derive(Default)]
    struct StubForm {
        invalid: HashSet<Step>,
        checked: Vec<Step>,
    }

    impl StubForm {
        fn failing(steps: &[Step]) -> Self {
            Self {
                invalid: steps.iter().copied().collect(),
                checked: Vec::new(),
            }
        }
    }

    impl StepValidator for StubForm {
        fn validate_step(&mut self, step: Step) -> Vec<FieldValidationError> {
            self.checked.push(step);
            if self.invalid.contains(&step) {
                vec![FieldValidationError {
                    field: format!("field{}", step.number()),
                    label: format!("Field {}", step.number()),
                    rule: "required".into(),
                    message: "is required".into(),
                }]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn test_starts_at_step_one() {
        let wizard = WizardStateMachine::new();
        assert_eq!(wizard.current(), Step::Identity);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_go_to_blocked_by_invalid_first_step() {
        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::failing(&[Step::Identity]);

        let err = wizard.go_to(3, &mut form).unwrap_err();
        assert!(matches!(err, NavigationError::Blocked { blocked_at: Step::Identity, .. }));
        assert_eq!(wizard.current(), Step::Identity);
    }

    #[test]
    fn test_go_to_blocked_by_middle_step() {
        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::failing(&[Step::Value]);

        assert_eq!(wizard.go_to(2, &mut form).unwrap(), Step::Value);
        let err = wizard.go_to(3, &mut form).unwrap_err();
        assert!(matches!(err, NavigationError::Blocked { target: 3, blocked_at: Step::Value, .. }));
        assert_eq!(wizard.current(), Step::Value);
    }

    #[test]
    fn test_go_to_out_of_range() {
        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::default();
        assert!(matches!(
            wizard.go_to(0, &mut form),
            Err(NavigationError::OutOfRange { target: 0, .. })
        ));
        assert!(matches!(
            wizard.go_to(4, &mut form),
            Err(NavigationError::OutOfRange { target: 4, .. })
        ));
        assert_eq!(wizard.current(), Step::Identity);
    }

    #[test]
    fn test_backward_navigation_skips_validation() {
        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::default();
        wizard.go_to(3, &mut form).unwrap();

        let mut broken = StubForm::failing(&[Step::Identity, Step::Value]);
        assert_eq!(wizard.previous(&mut broken).unwrap(), Step::Value);
        assert_eq!(wizard.go_to(1, &mut broken).unwrap(), Step::Identity);
        assert!(broken.checked.is_empty());
        assert!(wizard.previous(&mut broken).is_err());
    }

    #[test]
    fn test_next_checks_current_step_and_stops_at_last() {
        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::default();
        assert_eq!(wizard.next(&mut form).unwrap(), Step::Value);
        assert_eq!(wizard.next(&mut form).unwrap(), Step::Review);
        assert!(matches!(
            wizard.next(&mut form),
            Err(NavigationError::OutOfRange { target: 4, .. })
        ));

        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::failing(&[Step::Identity]);
        assert!(wizard.next(&mut form).is_err());
        assert_eq!(form.checked, vec![Step::Identity]);
    }

    #[test]
    fn test_submit_collects_errors_from_all_steps() {
        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::failing(&[Step::Identity, Step::Value]);

        let blocked = wizard.submit(&mut form).unwrap_err();
        let fields: Vec<_> = blocked.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["field1", "field2"]);
        assert_eq!(wizard.errors().len(), 2);
        assert_eq!(blocked.to_string(), "2 field(s) need attention");

        let mut fixed = StubForm::default();
        assert!(wizard.submit(&mut fixed).is_ok());
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_reset_returns_to_first_step() {
        let mut wizard = WizardStateMachine::new();
        let mut form = StubForm::default();
        wizard.go_to(3, &mut form).unwrap();
        wizard.reset();
        assert_eq!(wizard.current(), Step::Identity);
    }
}
