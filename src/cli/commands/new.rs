//! `setwiz new` command - create a setting record

use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::{collect_assignments, drive, is_interactive};
use crate::cli::host::{Destination, RecordSink, TerminalNotifier};
use crate::cli::GlobalOpts;
use crate::core::loader::RecordFormat;
use crate::core::record::SettingRecord;
use crate::core::Config;
use crate::form::controller::SettingsFormController;
use crate::form::fields::Field;

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Write the record to this file (.yaml, .yml or .json) instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print JSON instead of YAML when writing to stdout
    #[arg(long)]
    pub json: bool,

    /// Setting key (e.g. mail.smtp.host)
    #[arg(long, short = 'k')]
    pub key: Option<String>,

    /// Category (e.g. EMAIL, SECURITY)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Value type (e.g. STRING, BOOLEAN, COLOR)
    #[arg(long = "type", short = 't')]
    pub value_type: Option<String>,

    /// Value
    #[arg(long)]
    pub value: Option<String>,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Additional FIELD=VALUE assignments (e.g. sortOrder=3, isSystem=true)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Never prompt; submit the prefilled form directly
    #[arg(long)]
    pub no_input: bool,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    let mut seed = SettingRecord::default();
    seed.category = config.default_category();
    seed.value_type = config.default_value_type();

    let destination = match &args.output {
        Some(path) => Destination::File(path.clone()),
        None if args.json => Destination::Stdout(RecordFormat::Json),
        None => Destination::Stdout(RecordFormat::Yaml),
    };

    let mut form = SettingsFormController::edit(
        &seed,
        config.form_options(),
        RecordSink::new(destination),
        TerminalNotifier::new(global.quiet),
    );

    let assignments = collect_assignments(
        vec![
            (Field::Key, args.key),
            (Field::Category, args.category),
            (Field::ValueType, args.value_type),
            (Field::Value, args.value),
            (Field::Description, args.description),
        ],
        &args.set,
    )?;

    drive(&mut form, &assignments, is_interactive(args.no_input))
}
