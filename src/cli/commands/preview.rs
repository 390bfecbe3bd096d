//! `setwiz preview` command - show the live preview of a value

use miette::{IntoDiagnostic, Result};

use crate::form::registry::ValueTypeRegistry;
use crate::render::terminal::styled_preview;
use crate::render::HtmlRenderer;

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// Value type (e.g. LIST, JSON, PASSWORD)
    pub value_type: String,

    /// Raw value
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Render the preview as an HTML fragment
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// Print the preview model as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PreviewArgs) -> Result<()> {
    let preview = ValueTypeRegistry::new().preview_name(&args.value_type, &args.value);

    if args.html {
        println!("{}", HtmlRenderer::new()?.preview(&preview)?);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&preview).into_diagnostic()?);
    } else {
        println!("{}", styled_preview(&preview));
    }
    Ok(())
}
