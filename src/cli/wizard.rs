//! Interactive terminal driver for the settings form
//!
//! Each wizard step is a group of dialoguer prompts. Every answer goes
//! through the form controller, so the value input, validation marks and
//! preview follow the same rules as any other host.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::format_counter;
use crate::cli::host::TerminalNotifier;
use crate::core::record::SettingRecord;
use crate::core::value_type::{SettingCategory, ValueTypeTag};
use crate::form::controller::{FormError, SettingsFormController};
use crate::form::fields::Field;
use crate::form::host::SubmitSink;
use crate::form::registry::WidgetKind;
use crate::form::validator::Validator;
use crate::form::wizard::{NavigationError, Step, STEP_COUNT};
use crate::render::terminal::{styled_preview, summary_table};

type Form<S> = SettingsFormController<S, TerminalNotifier>;

/// Review-step choices
const REVIEW_ACTIONS: &[&str] = &["Save", "Back", "Start over", "Cancel"];

pub struct TerminalWizard {
    theme: ColorfulTheme,
}

impl Default for TerminalWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Drive the form until the record is saved (`Some`) or the user cancels (`None`)
    pub fn run<S: SubmitSink>(&self, form: &mut Form<S>) -> Result<Option<SettingRecord>> {
        loop {
            let step = form.current_step();
            println!();
            println!(
                "{} Step {}/{}: {}",
                style("◆").cyan(),
                step.number(),
                STEP_COUNT,
                style(step.title()).bold()
            );
            println!("{}", style("─".repeat(50)).dim());

            match step {
                Step::Identity => {
                    self.prompt_identity(form)?;
                    report_navigation(form.next_step());
                }
                Step::Value => {
                    self.prompt_value_step(form)?;
                    report_navigation(form.next_step());
                }
                Step::Review => {
                    println!("{}", summary_table(form.summary()));
                    let choice = Select::with_theme(&self.theme)
                        .with_prompt("What next?")
                        .items(REVIEW_ACTIONS)
                        .default(0)
                        .interact()
                        .into_diagnostic()?;
                    match choice {
                        0 => match form.handle_submit() {
                            Ok(record) => return Ok(Some(record)),
                            Err(FormError::Blocked(_)) => {
                                // Marks show which step to revisit
                                report_navigation(form.go_to_step(1));
                            }
                            Err(e) => return Err(e.into()),
                        },
                        1 => report_navigation(form.previous_step()),
                        2 => form.reset_form(),
                        _ => return Ok(None),
                    }
                }
            }
        }
    }

    fn prompt_identity<S: SubmitSink>(&self, form: &mut Form<S>) -> Result<()> {
        self.prompt_text(form, Field::Key, false)?;

        let categories = SettingCategory::all();
        let current = form.field(Field::Category).read().parse::<SettingCategory>().ok();
        let labels: Vec<String> = categories
            .iter()
            .map(|c| format!("{:<14} {}", c.label(), style(c.description()).dim()))
            .collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt(Field::Category.label())
            .items(&labels)
            .default(current.and_then(|c| categories.iter().position(|x| *x == c)).unwrap_or(0))
            .interact()
            .into_diagnostic()?;
        form.on_input(Field::Category, categories[selection].as_str());

        let tags = ValueTypeTag::all();
        let current = form.field(Field::ValueType).read().parse::<ValueTypeTag>().ok();
        let labels: Vec<String> = tags
            .iter()
            .map(|t| format!("{:<14} {}", t.label(), style(t.description()).dim()))
            .collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt(Field::ValueType.label())
            .items(&labels)
            .default(current.and_then(|t| tags.iter().position(|x| *x == t)).unwrap_or(0))
            .interact()
            .into_diagnostic()?;
        form.on_input(Field::ValueType, tags[selection].as_str());
        Ok(())
    }

    fn prompt_value_step<S: SubmitSink>(&self, form: &mut Form<S>) -> Result<()> {
        let descriptor = form.descriptor();
        println!("  {}", style(descriptor.help).dim());

        match descriptor.kind {
            WidgetKind::Toggle => {
                let current = form.field(Field::Value).read() == "true";
                let checked = Confirm::with_theme(&self.theme)
                    .with_prompt("Enabled?")
                    .default(current)
                    .interact()
                    .into_diagnostic()?;
                form.on_toggle(checked);
            }
            WidgetKind::Masked => {
                let has_value = !form.field(Field::Value).read().is_empty();
                let prompt = if has_value {
                    "Value (leave empty to keep the current one)"
                } else {
                    "Value"
                };
                let secret = Password::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .allow_empty_password(true)
                    .interact()
                    .into_diagnostic()?;
                if !(secret.is_empty() && has_value) {
                    form.on_input(Field::Value, &secret);
                }
            }
            _ => self.prompt_text(form, Field::Value, true)?,
        }
        println!("  {} {}", style("Preview:").dim(), styled_preview(form.preview()));

        self.prompt_text(form, Field::Description, false)?;
        self.prompt_text(form, Field::SortOrder, false)?;

        for field in [Field::IsSystem, Field::IsEncrypted] {
            let current = form.field(field).read() == "true";
            let answer = Confirm::with_theme(&self.theme)
                .with_prompt(field.label())
                .default(current)
                .interact()
                .into_diagnostic()?;
            form.on_input(field, &answer.to_string());
        }
        Ok(())
    }

    /// Free-text prompt validated with the field's current rules
    fn prompt_text<S: SubmitSink>(
        &self,
        form: &mut Form<S>,
        field: Field,
        show_preview: bool,
    ) -> Result<()> {
        let binding = form.field(field);
        let rules = binding.rules().to_vec();
        let max_length = binding.max_length();
        let label = binding.label();
        let prompt = match binding.counter() {
            Some(counter) => format!("{} ({})", label, format_counter(&counter)),
            None => label.to_string(),
        };

        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(binding.read().to_string())
            .allow_empty(true)
            .validate_with(move |input: &String| -> Result<(), String> {
                Validator::evaluate_with_limit(field.name(), label, &rules, max_length, input)
                    .map_err(|e| e.message)
            })
            .interact_text()
            .into_diagnostic()?;

        form.on_input(field, &value);
        if show_preview && form.preview().is_invalid() {
            eprintln!("  {}", styled_preview(form.preview()));
        }
        Ok(())
    }
}

/// Print why a step change was refused
fn report_navigation(result: std::result::Result<Step, NavigationError>) {
    match result {
        Ok(step) => tracing::debug!(step = step.number(), "entered step"),
        Err(NavigationError::Blocked { errors, .. }) => {
            for error in errors {
                eprintln!("  {} {}", style("✗").red(), error);
            }
        }
        Err(e) => eprintln!("  {} {}", style("!").yellow(), e),
    }
}
