//! Shared plumbing for the form-driving commands (`new`, `edit`)

use miette::Result;
use std::io::IsTerminal;

use crate::cli::helpers::{invalid_marks, parse_assignment};
use crate::cli::host::{RecordSink, TerminalNotifier};
use crate::cli::wizard::TerminalWizard;
use crate::form::controller::{FormError, SettingsFormController};
use crate::form::fields::Field;

pub type TerminalForm = SettingsFormController<RecordSink, TerminalNotifier>;

/// Collect `--set` assignments plus explicit flags, ordered by field so the
/// value type is applied before the value
pub fn collect_assignments(
    explicit: Vec<(Field, Option<String>)>,
    set: &[String],
) -> Result<Vec<(Field, String)>> {
    let mut assignments: Vec<(Field, String)> = explicit
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect();
    for item in set {
        assignments.push(parse_assignment(item)?);
    }
    assignments.sort_by_key(|(field, _)| *field);
    Ok(assignments)
}

/// Prefill the form, then either run the terminal wizard or submit directly
pub fn drive(form: &mut TerminalForm, assignments: &[(Field, String)], interactive: bool) -> Result<()> {
    for (field, value) in assignments {
        tracing::debug!(field = field.name(), "prefill");
        form.on_input(*field, value);
    }

    if interactive {
        return match TerminalWizard::new().run(form)? {
            Some(_) => Ok(()),
            None => {
                eprintln!("Cancelled; nothing was written");
                Ok(())
            }
        };
    }

    match form.handle_submit() {
        Ok(_) => Ok(()),
        Err(FormError::Blocked(blocked)) => {
            tracing::debug!(marks = ?invalid_marks(form), "submit blocked");
            Err(miette::miette!(
                "Setting not saved: {} field(s) need attention",
                blocked.errors.len()
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompts are drawn on stderr and read from stdin; both must be terminals
pub fn is_interactive(no_input: bool) -> bool {
    !no_input && console::user_attended_stderr() && std::io::stdin().is_terminal()
}
