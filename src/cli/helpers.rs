//! Shared helper functions for CLI commands

use console::style;
use miette::Result;

use crate::form::binding::{CharCounter, FieldMark};
use crate::form::controller::SettingsFormController;
use crate::form::fields::Field;
use crate::form::host::{Notifier, SubmitSink};

/// Parse a `field=value` assignment, accepting form names (`sortOrder`)
/// and snake_case record names (`sort_order`)
pub fn parse_assignment(s: &str) -> Result<(Field, String)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| miette::miette!("Expected FIELD=VALUE, got '{}'", s))?;
    let name = name.trim();
    let field = Field::from_name(name)
        .or_else(|| {
            Field::all()
                .iter()
                .copied()
                .find(|f| snake_case(f.name()) == name)
        })
        .ok_or_else(|| {
            let known: Vec<_> = Field::all().iter().map(|f| f.name()).collect();
            miette::miette!("Unknown field '{}' (known: {})", name, known.join(", "))
        })?;
    Ok((field, value.to_string()))
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `n/max`, highlighted once the field is nearly full
pub fn format_counter(counter: &CharCounter) -> String {
    if counter.is_warning() {
        style(counter).yellow().to_string()
    } else {
        style(counter).dim().to_string()
    }
}

/// Aligned `label: value` lines
pub fn print_key_values(lines: &[(&str, String)]) {
    let width = lines.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in lines {
        println!(
            "  {}  {}",
            style(format!("{:<width$}", key, width = width)).cyan(),
            value
        );
    }
}

/// Invalid field marks as `label: message` lines
pub fn invalid_marks<S: SubmitSink, N: Notifier>(form: &SettingsFormController<S, N>) -> Vec<String> {
    Field::all()
        .iter()
        .filter_map(|field| match form.field(*field).mark() {
            FieldMark::Invalid(message) => Some(format!("{}: {}", field.label(), message)),
            _ => None,
        })
        .collect()
}
