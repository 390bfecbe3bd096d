//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::value_type::{SettingCategory, ValueTypeTag};
use crate::form::FormOptions;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".setwiz.yaml";

/// setwiz configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Characters of the value shown in the review summary
    pub summary_limit: Option<usize>,

    /// Color seeded into an empty COLOR widget
    pub default_color: Option<String>,

    /// Prefix the value field's rules with `required`
    pub require_value: Option<bool>,

    /// Category preselected when creating a record
    pub default_category: Option<SettingCategory>,

    /// Value type preselected when creating a record
    pub default_value_type: Option<ValueTypeTag>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (accessors below)

        // 2. Global user config (~/.config/setwiz/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_file(&global_path);
        }

        // 3. Local config in the working directory
        config.merge_file(&Self::local_config_path());

        // 4. Environment variables
        if let Some(limit) = std::env::var("SETWIZ_SUMMARY_LIMIT")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            config.summary_limit = Some(limit);
        }
        if let Ok(color) = std::env::var("SETWIZ_DEFAULT_COLOR") {
            config.default_color = Some(color);
        }
        if let Ok(flag) = std::env::var("SETWIZ_REQUIRE_VALUE") {
            config.require_value = Some(matches!(flag.trim(), "1" | "true" | "yes"));
        }

        config
    }

    /// Parse a config document
    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yml::Error> {
        // An empty file deserializes to null
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents)
    }

    fn merge_file(&mut self, path: &std::path::Path) {
        if !path.exists() {
            return;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_yaml_str(&contents) {
                Ok(other) => self.merge(other),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config"),
            },
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "cannot read config"),
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "setwiz")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to the local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.summary_limit.is_some() {
            self.summary_limit = other.summary_limit;
        }
        if other.default_color.is_some() {
            self.default_color = other.default_color;
        }
        if other.require_value.is_some() {
            self.require_value = other.require_value;
        }
        if other.default_category.is_some() {
            self.default_category = other.default_category;
        }
        if other.default_value_type.is_some() {
            self.default_value_type = other.default_value_type;
        }
    }

    /// Options handed to a form controller
    pub fn form_options(&self) -> FormOptions {
        let defaults = FormOptions::default();
        FormOptions {
            summary_limit: self.summary_limit.unwrap_or(defaults.summary_limit),
            default_color: self
                .default_color
                .clone()
                .unwrap_or(defaults.default_color),
            require_value: self.require_value.unwrap_or(defaults.require_value),
        }
    }

    pub fn default_category(&self) -> SettingCategory {
        self.default_category.unwrap_or_default()
    }

    pub fn default_value_type(&self) -> ValueTypeTag {
        self.default_value_type.unwrap_or(ValueTypeTag::String)
    }
}
