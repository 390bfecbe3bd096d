//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, config::ConfigCommands,
    describe::DescribeArgs, edit::EditArgs, new::NewArgs, preview::PreviewArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "setwiz")]
#[command(author, version, about = "Type-driven settings form wizard")]
#[command(long_about = "Create, edit and check typed key/value setting records through a step-gated form whose value input, validation and preview follow the setting's value type.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new setting record with the form wizard
    New(NewArgs),

    /// Edit an existing setting record with the form wizard
    Edit(EditArgs),

    /// Check record files against the schema and the form rules
    Check(CheckArgs),

    /// Show the value input used for a value type
    Describe(DescribeArgs),

    /// Show the live preview of a value
    Preview(PreviewArgs),

    /// Evaluate a comma-separated rule list against a value
    Validate(ValidateArgs),

    /// List all value types with their widgets and rules
    Types,

    /// Configuration inspection
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
