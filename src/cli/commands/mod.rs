//! CLI command implementations

pub mod utils;

pub mod check;
pub mod completions;
pub mod config;
pub mod describe;
pub mod edit;
pub mod new;
pub mod preview;
pub mod types;
pub mod validate;
