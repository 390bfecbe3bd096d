//! `setwiz validate` command - evaluate validation rules against a value

use console::style;
use miette::Result;

use crate::form::validator::{parse_rule_list, Rule, Validator};
use crate::render::terminal::rule_results_table;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Comma-separated rule names (e.g. "required,email")
    pub rules: String,

    /// Value to check
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Field label used in messages
    #[arg(long, default_value = "Value")]
    pub label: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let rules = parse_rule_list(&args.rules);

    for name in args.rules.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if Rule::from_name(name).is_none() {
            eprintln!(
                "{} Unknown rule '{}' always passes",
                style("!").yellow(),
                name
            );
        }
    }

    let results = Validator::results(&args.label, &rules, &args.value);
    if !results.is_empty() {
        println!("{}", rule_results_table(&results));
    }

    match Validator::evaluate("value", &args.label, &rules, &args.value) {
        Ok(()) => {
            println!("{} valid", style("✓").green());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
