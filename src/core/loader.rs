//! Record file loading
//!
//! Record files are YAML (`.yaml`, `.yml`) or JSON (`.json`). Every document is
//! checked against the embedded setting schema before it is deserialized, so
//! errors point at the offending line.

use jsonschema::{validator_for, Validator as JsonValidator};
use miette::Diagnostic;
use rust_embed::Embed;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::diagnostics::{schema_violation, SchemaError, SyntaxError};
use crate::core::record::SettingRecord;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// File name of the embedded record schema
pub const RECORD_SCHEMA: &str = "setting.schema.json";

/// On-disk encoding of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Yaml,
    Json,
}

impl RecordFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(RecordFormat::Yaml),
            Some("json") => Some(RecordFormat::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecordFormat::Yaml => "YAML",
            RecordFormat::Json => "JSON",
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Cannot access {path}: {source}")]
    #[diagnostic(code(setwiz::record::io))]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Unsupported record file: {0}")]
    #[diagnostic(
        code(setwiz::record::format),
        help("Record files end in .yaml, .yml or .json")
    )]
    UnsupportedFormat(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error("Record schema unavailable: {0}")]
    #[diagnostic(code(setwiz::record::schema_unavailable))]
    SchemaUnavailable(String),

    #[error("Cannot decode record: {0}")]
    #[diagnostic(code(setwiz::record::decode))]
    Decode(String),

    #[error("Cannot encode record: {0}")]
    #[diagnostic(code(setwiz::record::encode))]
    Encode(String),
}

/// Compiled setting schema
pub struct RecordSchema {
    compiled: JsonValidator,
}

impl RecordSchema {
    /// Compile the schema embedded in the binary
    pub fn embedded() -> Result<Self, LoadError> {
        let file = EmbeddedSchemas::get(RECORD_SCHEMA)
            .ok_or_else(|| LoadError::SchemaUnavailable(format!("{} is not embedded", RECORD_SCHEMA)))?;
        let schema: JsonValue = serde_json::from_slice(&file.data)
            .map_err(|e| LoadError::SchemaUnavailable(e.to_string()))?;
        let compiled =
            validator_for(&schema).map_err(|e| LoadError::SchemaUnavailable(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Check a parsed document, reporting every violation against `content`
    pub fn check(
        &self,
        document: &JsonValue,
        content: &str,
        filename: &str,
    ) -> Result<(), SchemaError> {
        let violations: Vec<_> = self
            .compiled
            .iter_errors(document)
            .map(|e| schema_violation(content, &e))
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::new(filename, content, violations))
        }
    }
}

/// Parse text into a JSON value without interpreting it
pub fn parse_document(
    content: &str,
    filename: &str,
    format: RecordFormat,
) -> Result<JsonValue, SyntaxError> {
    match format {
        RecordFormat::Json => {
            serde_json::from_str(content).map_err(|e| SyntaxError::from_json(&e, content, filename))
        }
        RecordFormat::Yaml => {
            // An empty document is null; the schema reports it
            let yaml: serde_yml::Value = serde_yml::from_str(content)
                .map_err(|e| SyntaxError::from_yaml(&e, content, filename))?;
            serde_json::to_value(&yaml)
                .map_err(|e| SyntaxError::at("YAML", e.to_string(), content, filename, 1, 1))
        }
    }
}

/// Parse, schema-check and decode a record
pub fn parse_record(
    content: &str,
    filename: &str,
    format: RecordFormat,
) -> Result<SettingRecord, LoadError> {
    let document = parse_document(content, filename, format)?;
    RecordSchema::embedded()?.check(&document, content, filename)?;
    serde_json::from_value(document).map_err(|e| LoadError::Decode(e.to_string()))
}

/// Load a record file
pub fn load_record(path: &Path) -> Result<SettingRecord, LoadError> {
    let format = RecordFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?;
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(path = %path.display(), format = format.name(), "loading record");
    parse_record(&content, &filename, format)
}

/// Serialize a record in the given format
pub fn render_record(record: &SettingRecord, format: RecordFormat) -> Result<String, LoadError> {
    match format {
        RecordFormat::Yaml => {
            serde_yml::to_string(record).map_err(|e| LoadError::Encode(e.to_string()))
        }
        RecordFormat::Json => serde_json::to_string_pretty(record)
            .map(|s| s + "\n")
            .map_err(|e| LoadError::Encode(e.to_string())),
    }
}

/// Write a record, choosing the format from the extension (YAML when unknown)
pub fn save_record(record: &SettingRecord, path: &Path) -> Result<(), LoadError> {
    let format = RecordFormat::from_path(path).unwrap_or(RecordFormat::Yaml);
    let text = render_record(record, format)?;
    fs::write(path, text).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Expand files and directories into record files, sorted per argument.
/// Hidden entries (such as `.setwiz.yaml`) inside directories are skipped.
pub fn find_record_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| RecordFormat::from_path(p).is_some())
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value_type::{SettingCategory, ValueTypeTag};
    use tempfile::tempdir;

    #[test]
    fn test_embedded_schema_compiles() {
        assert!(RecordSchema::embedded().is_ok());
    }

    #[test]
    fn test_parse_yaml_record() {
        let yaml = r#"
key: mail.smtp.port
category: EMAIL
value_type: INTEGER
value: "587"
sort_order: 2
"#;
        let record = parse_record(yaml, "port.yaml", RecordFormat::Yaml).unwrap();
        assert_eq!(record.key, "mail.smtp.port");
        assert_eq!(record.category, SettingCategory::Email);
        assert_eq!(record.value_type, ValueTypeTag::Integer);
        assert_eq!(record.value, "587");
        assert_eq!(record.sort_order, 2);
        assert!(!record.is_system);
    }

    #[test]
    fn test_parse_json_record() {
        let json = r##"{"key": "ui.accent", "value_type": "COLOR", "value": "#112233"}"##;
        let record = parse_record(json, "accent.json", RecordFormat::Json).unwrap();
        assert_eq!(record.value_type, ValueTypeTag::Color);
        assert_eq!(record.category, SettingCategory::General);
    }

    #[test]
    fn test_schema_violations_reported() {
        let yaml = "key: 9lives\nvalue_type: CURRENCY\ncolour: red\n";
        let err = parse_record(yaml, "bad.yaml", RecordFormat::Yaml).unwrap_err();
        match err {
            LoadError::Schema(schema) => assert_eq!(schema.violations().len(), 3),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_unquoted_number_value_rejected() {
        let yaml = "key: retries\nvalue: 3\n";
        assert!(matches!(
            parse_record(yaml, "retries.yaml", RecordFormat::Yaml),
            Err(LoadError::Schema(_))
        ));
    }

    #[test]
    fn test_syntax_error_reported() {
        let err = parse_record("{\"key\": ", "broken.json", RecordFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.yaml");
        let record = SettingRecord::new("ui.theme", "dark").with_description("Theme name");

        save_record(&record, &path).unwrap();
        assert_eq!(load_record(&path).unwrap(), record);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "key: a").unwrap();
        assert!(matches!(load_record(&path), Err(LoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_find_record_files_skips_hidden_and_foreign() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.yaml"), "key: b").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        fs::write(dir.path().join(".setwiz.yaml"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.yml"), "key: c").unwrap();

        let files = find_record_files(&[dir.path().to_path_buf()]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.yaml", "c.yml"]);
    }
}
