//! `setwiz edit` command - edit an existing setting record

use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::{collect_assignments, drive, is_interactive};
use crate::cli::host::{Destination, RecordSink, TerminalNotifier};
use crate::cli::GlobalOpts;
use crate::core::loader::load_record;
use crate::core::Config;
use crate::form::controller::SettingsFormController;

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Record file to edit
    pub file: PathBuf,

    /// Write the result here instead of back to FILE
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// FIELD=VALUE assignments applied before the wizard starts
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Never prompt; submit the edited form directly
    #[arg(long)]
    pub no_input: bool,
}

pub fn run(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let record = load_record(&args.file)?;

    let target = args.output.clone().unwrap_or_else(|| args.file.clone());
    let mut form = SettingsFormController::edit(
        &record,
        config.form_options(),
        RecordSink::new(Destination::File(target)),
        TerminalNotifier::new(global.quiet),
    );

    let assignments = collect_assignments(Vec::new(), &args.set)?;
    drive(&mut form, &assignments, is_interactive(args.no_input))
}
