use clap::Parser;
use miette::Result;
use setwiz::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(global.verbose);

    match cli.command {
        Commands::New(args) => setwiz::cli::commands::new::run(args, &global),
        Commands::Edit(args) => setwiz::cli::commands::edit::run(args, &global),
        Commands::Check(args) => setwiz::cli::commands::check::run(args, &global),
        Commands::Describe(args) => setwiz::cli::commands::describe::run(args),
        Commands::Preview(args) => setwiz::cli::commands::preview::run(args),
        Commands::Validate(args) => setwiz::cli::commands::validate::run(args),
        Commands::Types => setwiz::cli::commands::types::run(),
        Commands::Config(cmd) => setwiz::cli::commands::config::run(cmd),
        Commands::Completions(args) => setwiz::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr. `SETWIZ_LOG` (or `RUST_LOG`) overrides the level;
/// `--verbose` raises the default from warn to debug.
fn init_logging(verbose: bool) {
    let default = if verbose { "setwiz=debug" } else { "warn" };
    let filter = std::env::var("SETWIZ_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
