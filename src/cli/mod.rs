//! CLI module - argument parsing, command dispatch and the terminal host

pub mod args;
pub mod commands;
pub mod helpers;
pub mod host;
pub mod wizard;

pub use args::{Cli, Commands, GlobalOpts};
