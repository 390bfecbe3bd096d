//! `setwiz check` command - validate record files

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::loader::{find_record_files, load_record};
use crate::core::Config;
use crate::form::controller::check_record;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,

    /// Stop at the first failing file
    #[arg(long)]
    pub fail_fast: bool,
}

/// Check statistics
#[derive(Default)]
struct CheckStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let options = Config::load().form_options();
    let files = find_record_files(&args.paths);
    let mut stats = CheckStats::default();

    if files.is_empty() {
        if !global.quiet {
            println!("{} No record files found", style("!").yellow());
        }
        return Ok(());
    }

    if !global.quiet {
        println!("{} Checking {} file(s)...\n", style("→").blue(), files.len());
    }

    for path in &files {
        stats.files_checked += 1;

        let record = match load_record(path) {
            Ok(record) => record,
            Err(e) => {
                stats.files_failed += 1;
                stats.total_errors += 1;
                if !args.summary {
                    println!("{} {}", style("✗").red(), path.display());
                    println!("{:?}", miette::Report::new(e));
                }
                if args.fail_fast {
                    break;
                }
                continue;
            }
        };

        let errors = check_record(&record, &options);
        if errors.is_empty() {
            stats.files_passed += 1;
            if !args.summary && !global.quiet {
                println!(
                    "{} {}  {}",
                    style("✓").green(),
                    path.display(),
                    style(format!("{} = {}", record.key, record.display_value())).dim()
                );
            }
            continue;
        }

        stats.files_failed += 1;
        stats.total_errors += errors.len();
        if !args.summary {
            println!(
                "{} {} - {} error(s)",
                style("✗").red(),
                path.display(),
                errors.len()
            );
            for error in &errors {
                println!("    {}", style(error).red());
            }
        }
        if args.fail_fast {
            break;
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Check Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());

    if stats.files_failed > 0 {
        Err(miette::miette!("{} file(s) failed the check", stats.files_failed))
    } else {
        Ok(())
    }
}
