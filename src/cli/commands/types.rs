//! `setwiz types` command - list value types

use miette::Result;

use crate::form::registry::ValueTypeRegistry;
use crate::render::terminal::types_table;

pub fn run() -> Result<()> {
    println!("{}", types_table(&ValueTypeRegistry::new()));
    Ok(())
}
