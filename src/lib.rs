//! setwiz: type-driven settings forms
//!
//! A form engine for typed key/value setting records. The value type of a
//! record selects its input widget, validation rules and live preview; a
//! three-step wizard gates navigation and submission on validation.

pub mod cli;
pub mod core;
pub mod form;
pub mod render;
