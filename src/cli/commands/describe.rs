//! `setwiz describe` command - show the value input for a value type

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::print_key_values;
use crate::form::registry::ValueTypeRegistry;
use crate::render::terminal::descriptor_lines;
use crate::render::HtmlRenderer;

#[derive(clap::Args, Debug)]
pub struct DescribeArgs {
    /// Value type (e.g. INTEGER, color, file-path)
    pub value_type: String,

    /// Render the input as an HTML fragment
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// Print the descriptor as JSON
    #[arg(long)]
    pub json: bool,

    /// Current value to render into the input (with --html)
    #[arg(long, default_value = "")]
    pub value: String,
}

pub fn run(args: DescribeArgs) -> Result<()> {
    let registry = ValueTypeRegistry::new();
    let descriptor = registry.describe_name(&args.value_type);

    if args.html {
        let html = HtmlRenderer::new()?.widget(descriptor, "value", &args.value)?;
        println!("{}", html);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(descriptor).into_diagnostic()?);
    } else {
        if descriptor.tag.is_none() {
            eprintln!(
                "{} Unknown value type '{}', showing the plain-text input",
                style("!").yellow(),
                args.value_type
            );
        }
        print_key_values(&descriptor_lines(descriptor));
    }
    Ok(())
}
