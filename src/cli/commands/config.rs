//! `setwiz config` command - configuration management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g. summary_limit)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of the local one
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of the local one
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("summary_limit", "Characters of the value shown in the review summary (default 50)"),
    ("default_color", "Color seeded into an empty COLOR input (default #0d6efd)"),
    ("require_value", "Require a non-empty value for every type (default false)"),
    ("default_category", "Category preselected for new records (default GENERAL)"),
    ("default_value_type", "Value type preselected for new records (default STRING)"),
];

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        ensure_known_key(key)?;
        println!("{}", get_config_value(&config, key));
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        println!(
            "  {}: {}",
            style(key).cyan(),
            style(get_config_value(&config, key)).yellow()
        );
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (SETWIZ_SUMMARY_LIMIT, SETWIZ_DEFAULT_COLOR, SETWIZ_REQUIRE_VALUE)");
    println!("  2. Local config ({})", LOCAL_CONFIG_FILE);
    println!("  3. Global config (~/.config/setwiz/config.yaml)");
    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    ensure_known_key(&args.key)?;
    let path = config_path(args.global)?;

    // Typed scalars stay typed; anything else (including `#rrggbb`, a YAML comment) is a string
    let value = match serde_yml::from_str::<serde_yml::Value>(&args.value) {
        Ok(v) if !v.is_null() && !v.is_mapping() && !v.is_sequence() => v,
        _ => serde_yml::Value::String(args.value.clone()),
    };
    let mut map = read_mapping(&path)?;
    map.insert(serde_yml::Value::String(args.key.clone()), value);

    // Reject values the loader would not accept
    let yaml = serde_yml::to_string(&map).into_diagnostic()?;
    Config::from_yaml_str(&yaml)
        .map_err(|e| miette::miette!("Invalid value for {}: {}", args.key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&path, yaml).into_diagnostic()?;

    println!(
        "{} Set {} {} {} in {}",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        path.display()
    );
    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    let path = config_path(args.global)?;
    if !path.exists() {
        return Err(miette::miette!("Config file does not exist: {}", path.display()));
    }

    let mut map = read_mapping(&path)?;
    if map.remove(serde_yml::Value::String(args.key.clone())).is_none() {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }
    fs::write(&path, serde_yml::to_string(&map).into_diagnostic()?).into_diagnostic()?;

    println!(
        "{} Removed {} from {}",
        style("✓").green(),
        style(&args.key).cyan(),
        path.display()
    );
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => print_path("Global:", &path),
        None => println!("  {} {}", style("Global:").cyan(), style("(unavailable)").dim()),
    }
    print_path("Local: ", &Config::local_config_path());
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();
    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }
    println!();
    println!(
        "{}",
        style("Use 'setwiz config set <key> <value>' to set a value.").dim()
    );
    Ok(())
}

fn print_path(label: &str, path: &std::path::Path) {
    let state = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("  {} {} {}", style(label).cyan(), path.display(), state);
}

fn ensure_known_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            "Unknown configuration key '{}'. Run 'setwiz config keys' to list them",
            key
        ))
    }
}

fn config_path(global: bool) -> Result<PathBuf> {
    if global {
        Config::global_config_path()
            .ok_or_else(|| miette::miette!("Could not determine global config directory"))
    } else {
        Ok(Config::local_config_path())
    }
}

fn read_mapping(path: &std::path::Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content).into_diagnostic()? {
        serde_yml::Value::Mapping(map) => Ok(map),
        serde_yml::Value::Null => Ok(serde_yml::Mapping::new()),
        _ => Err(miette::miette!("{} is not a YAML mapping", path.display())),
    }
}

fn get_config_value(config: &Config, key: &str) -> String {
    let options = config.form_options();
    match key {
        "summary_limit" => options.summary_limit.to_string(),
        "default_color" => options.default_color,
        "require_value" => options.require_value.to_string(),
        "default_category" => config.default_category().to_string(),
        "default_value_type" => config.default_value_type().to_string(),
        _ => String::new(),
    }
}
