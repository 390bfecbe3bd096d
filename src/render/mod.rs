//! Renderers for form state: HTML fragments and terminal output

pub mod html;
pub mod terminal;

pub use html::{HtmlRenderer, RenderError};
