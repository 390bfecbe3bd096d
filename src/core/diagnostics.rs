//! Record file diagnostics with source spans

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError as JsonSchemaError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Syntax error in a YAML or JSON record file
#[derive(Debug, Error, Diagnostic)]
#[error("{format} syntax error: {message}")]
#[diagnostic(code(setwiz::record::syntax))]
pub struct SyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    format: &'static str,
    message: String,
}

impl SyntaxError {
    /// Build an error pointing at a 1-based line/column
    pub fn at(
        format: &'static str,
        message: impl Into<String>,
        source: &str,
        filename: &str,
        line: usize,
        column: usize,
    ) -> Self {
        let message = message.into();
        let offset = line_col_to_offset(source, line, column);
        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help: syntax_help(&message),
            format,
            message,
        }
    }

    pub fn from_yaml(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));
        Self::at("YAML", err.to_string(), source, filename, line, column)
    }

    pub fn from_json(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        Self::at(
            "JSON",
            err.to_string(),
            source,
            filename,
            err.line().max(1),
            err.column().max(1),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Record file rejected by the setting schema
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(setwiz::record::schema))]
pub struct SchemaError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

impl SchemaError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let summary = match violations.len() {
            1 => "1 error".to_string(),
            n => format!("{} errors", n),
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

/// Convert a JSON Schema error into a violation anchored in the source text
pub fn schema_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let at = if path.is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", path.trim_start_matches('/'))
    };

    let (message, hint, help) = match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| property.to_string());
            (
                format!("Missing required field: {}", name),
                "required field missing".to_string(),
                Some(format!("Add the '{}' field to the record", name)),
            )
        }
        ValidationErrorKind::Enum { options } => {
            let opts = enum_options(options);
            (
                format!("Invalid value at {}", at),
                "invalid value".to_string(),
                Some(format!("Valid values: {}", opts)),
            )
        }
        ValidationErrorKind::Pattern { .. } => (
            format!("Value at {} has an invalid format", at),
            "pattern mismatch".to_string(),
            Some("Keys start with a letter followed by letters, digits, dots, dashes or underscores".to_string()),
        ),
        ValidationErrorKind::MinLength { limit } => (
            format!("Value at {} is too short: minimum {} characters", at, limit),
            "too short".to_string(),
            None,
        ),
        ValidationErrorKind::MaxLength { limit } => (
            format!("Value at {} is too long: maximum {} characters", at, limit),
            "too long".to_string(),
            None,
        ),
        ValidationErrorKind::Minimum { limit } => (
            format!("Value at {} is too small: minimum {}", at, limit),
            "out of range".to_string(),
            None,
        ),
        ValidationErrorKind::Maximum { limit } => (
            format!("Value at {} is too large: maximum {}", at, limit),
            "out of range".to_string(),
            None,
        ),
        ValidationErrorKind::Type { kind } => (
            format!("Wrong type at {}: expected {:?}", at, kind),
            "wrong type".to_string(),
            Some("Quote values so they are read as text, e.g. value: \"42\"".to_string()),
        ),
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            format!("Unknown field(s) at {}: {}", at, unexpected.join(", ")),
            "unknown field".to_string(),
            Some("Remove unknown fields or check spelling".to_string()),
        ),
        _ => (
            format!("Validation error at {}: {}", at, error),
            "validation error".to_string(),
            None,
        ),
    };

    SchemaViolation {
        span: path_span(content, &path),
        message,
        hint,
        help,
    }
}

fn enum_options(options: &JsonValue) -> String {
    match options.as_array() {
        Some(values) => values
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", "),
        None => options.to_string(),
    }
}

/// Convert 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            return start + within;
        }
        start += text.len();
    }
    source.len().saturating_sub(1)
}

fn first_line_span(content: &str) -> SourceSpan {
    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

/// Span of the entry named by the last component of a JSON pointer
fn path_span(content: &str, json_path: &str) -> SourceSpan {
    let key = json_path.rsplit('/').find(|part| !part.is_empty());
    match key {
        Some(key) => key_span(content, key).unwrap_or_else(|| first_line_span(content)),
        None => first_line_span(content),
    }
}

/// Span of a `key:` (YAML) or `"key":` (JSON) line
fn key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let yaml_key = format!("{}:", key);
    let json_key = format!("\"{}\"", key);

    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&yaml_key) || trimmed.starts_with(&json_key) {
            let indent = line.len() - trimmed.len();
            return Some((offset + indent, trimmed.trim_end().len()).into());
        }
        offset += line.len();
    }
    None
}

fn syntax_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs".to_string());
    }
    if msg.contains("duplicate") {
        return Some("Each field can only appear once".to_string());
    }
    if msg.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation".to_string());
    }
    if msg.contains("trailing comma") {
        return Some("JSON does not allow a comma after the last entry".to_string());
    }
    if msg.contains("key must be a string") {
        return Some("Quote field names in JSON: \"key\": \"value\"".to_string());
    }
    None
}
