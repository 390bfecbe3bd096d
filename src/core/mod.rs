//! Core module - setting record, value types, configuration and file loading

pub mod config;
pub mod diagnostics;
pub mod loader;
pub mod record;
pub mod value_type;

pub use config::Config;
pub use loader::{load_record, save_record, LoadError, RecordFormat};
pub use record::{SettingRecord, MASK};
pub use value_type::{SettingCategory, TagParseError, ValueTypeTag};
