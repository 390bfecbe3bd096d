//! Terminal rendering: styled previews and tables

use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::core::value_type::ValueTypeTag;
use crate::form::preview::{LinkKind, Preview};
use crate::form::registry::{ValueTypeRegistry, WidgetDescriptor};
use crate::form::summary::Summary;
use crate::form::validator::RuleResult;

/// One styled block for a preview
pub fn styled_preview(preview: &Preview) -> String {
    match preview {
        Preview::Empty => style("(empty)").dim().to_string(),
        Preview::Redacted { mask } => style(mask).dim().to_string(),
        Preview::Badge { enabled, label } => {
            if *enabled {
                style(format!("✓ {}", label)).green().to_string()
            } else {
                style(format!("✗ {}", label)).dim().to_string()
            }
        }
        Preview::Swatch { hex } => format!("■ {}", style(hex).bold()),
        Preview::Link { kind, text, .. } => {
            let icon = match kind {
                LinkKind::Mail => "✉",
                LinkKind::Web => "↗",
            };
            format!("{} {}", icon, style(text).cyan().underlined())
        }
        Preview::Chips { items } => items
            .iter()
            .map(|item| style(format!("[{}]", item)).cyan().to_string())
            .collect::<Vec<_>>()
            .join(" "),
        Preview::Json { pretty } => pretty.clone(),
        Preview::InvalidJson { message } => {
            format!("{} {}", style("Invalid JSON:").red().bold(), style(message).dim())
        }
        Preview::Lines { lines } => lines.join("\n"),
        Preview::Text { text } => text.clone(),
    }
}

/// Review summary as a two-column table
pub fn summary_table(summary: &Summary) -> String {
    let mut builder = Builder::default();
    for (label, value) in summary.rows() {
        builder.push_record([label, value]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Every value type with its widget and rules
pub fn types_table(registry: &ValueTypeRegistry) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Type", "Label", "Widget", "Rules", "Description"]);
    for tag in ValueTypeTag::all() {
        let descriptor = registry.describe(*tag);
        let rules = descriptor.rule_names().join(", ");
        builder.push_record([
            tag.as_str(),
            tag.label(),
            descriptor.kind.as_str(),
            if rules.is_empty() { "-" } else { rules.as_str() },
            tag.description(),
        ]);
    }
    builder.build().with(Style::modern()).to_string()
}

/// Outcome of each rule of a `validate` run
pub fn rule_results_table(results: &[RuleResult]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Rule", "Result", "Message"]);
    for result in results {
        let verdict = if result.passed { "pass" } else { "fail" };
        let message = if result.passed { "" } else { result.message.as_str() };
        builder.push_record([result.rule.as_str(), verdict, message]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Key/value listing of a widget descriptor
pub fn descriptor_lines(descriptor: &WidgetDescriptor) -> Vec<(&'static str, String)> {
    let tag = descriptor
        .tag
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| "(fallback)".to_string());
    let constraints = descriptor
        .constraints
        .iter()
        .map(|c| {
            let (name, value) = c.attribute();
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ");
    let rules = descriptor.rule_names().join(", ");
    let or_dash = |s: String| if s.is_empty() { "-".to_string() } else { s };

    vec![
        ("Type", tag),
        ("Widget", descriptor.kind.as_str().to_string()),
        ("Input", descriptor.input_type.to_string()),
        ("Placeholder", or_dash(descriptor.placeholder.to_string())),
        ("Help", descriptor.help.to_string()),
        ("Constraints", or_dash(constraints)),
        ("Rules", or_dash(rules)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::SettingRecord;
    use crate::form::fields::FieldSet;
    use crate::form::validator::{Rule, Validator};

    #[test]
    fn test_types_table_lists_every_tag() {
        let table = types_table(&ValueTypeRegistry::new());
        for tag in ValueTypeTag::all() {
            assert!(table.contains(tag.as_str()), "missing {}", tag);
        }
        assert!(table.contains("color-picker"));
    }

    #[test]
    fn test_summary_table_has_labels() {
        let record = SettingRecord::new("app.name", "Shop");
        let table = summary_table(&Summary::build(&FieldSet::seeded(&record), 50));
        assert!(table.contains("Key"));
        assert!(table.contains("app.name"));
        assert!(table.contains("Shop"));
    }

    #[test]
    fn test_rule_results_table() {
        let results = Validator::results("Value", &[Rule::Required, Rule::Email], "nope");
        let table = rule_results_table(&results);
        assert!(table.contains("pass"));
        assert!(table.contains("Invalid email format"));
    }

    #[test]
    fn test_styled_preview_plain_parts() {
        console::set_colors_enabled(false);
        assert_eq!(styled_preview(&Preview::Text { text: "hi".into() }), "hi");
        assert_eq!(
            styled_preview(&Preview::Chips { items: vec!["a".into(), "b".into()] }),
            "[a] [b]"
        );
    }

    #[test]
    fn test_descriptor_lines_fallbacks() {
        let registry = ValueTypeRegistry::new();
        let lines = descriptor_lines(registry.describe_name("CURRENCY"));
        assert_eq!(lines[0], ("Type", "(fallback)".to_string()));
        assert_eq!(lines[6], ("Rules", "-".to_string()));
    }
}
