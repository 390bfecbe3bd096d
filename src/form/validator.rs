//! Rule-based field validation with short-circuit reporting

use miette::Diagnostic;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use crate::core::value_type::{SettingCategory, ValueTypeTag};

static KEY_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9._-]*$").expect("static pattern"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static pattern"));
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("static pattern"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("static pattern"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("static pattern"));
static COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static pattern"));

/// Rule name reported when a length-limited field is too long
pub const MAX_LENGTH_RULE: &str = "max-length";

/// Message for rule names outside the fixed set
pub const FALLBACK_MESSAGE: &str = "Invalid value";

/// A named validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Required,
    KeyFormat,
    Email,
    Url,
    Integer,
    Decimal,
    Color,
    Json,
    Category,
    ValueType,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::KeyFormat => "key-format",
            Rule::Email => "email",
            Rule::Url => "url",
            Rule::Integer => "integer",
            Rule::Decimal => "decimal",
            Rule::Color => "color",
            Rule::Json => "json",
            Rule::Category => "category",
            Rule::ValueType => "value-type",
        }
    }

    pub fn from_name(name: &str) -> Option<Rule> {
        Self::all().iter().copied().find(|r| r.name() == name.trim())
    }

    pub fn all() -> &'static [Rule] {
        &[
            Rule::Required,
            Rule::KeyFormat,
            Rule::Email,
            Rule::Url,
            Rule::Integer,
            Rule::Decimal,
            Rule::Color,
            Rule::Json,
            Rule::Category,
            Rule::ValueType,
        ]
    }

    /// Whether `raw` satisfies this rule.
    ///
    /// Every rule except `required` and `key-format` accepts the empty string;
    /// mandatory fields compose `required` explicitly.
    pub fn check(&self, raw: &str) -> bool {
        match self {
            Rule::Required => !raw.trim().is_empty(),
            Rule::KeyFormat => KEY_FORMAT.is_match(raw),
            Rule::Email => raw.is_empty() || EMAIL.is_match(raw),
            Rule::Url => raw.is_empty() || URL.is_match(raw),
            Rule::Integer => raw.is_empty() || INTEGER.is_match(raw),
            Rule::Decimal => raw.is_empty() || DECIMAL.is_match(raw),
            Rule::Color => raw.is_empty() || COLOR.is_match(raw),
            Rule::Json => raw.is_empty() || serde_json::from_str::<serde_json::Value>(raw).is_ok(),
            Rule::Category => raw.is_empty() || raw.parse::<SettingCategory>().is_ok(),
            Rule::ValueType => raw.is_empty() || raw.parse::<ValueTypeTag>().is_ok(),
        }
    }

    /// User-facing message when this rule fails for the field `label`
    pub fn message(&self, label: &str) -> String {
        match self {
            Rule::Required => format!("{} is required", label),
            Rule::KeyFormat => {
                "Invalid format (letters, digits, dots, dashes, underscores)".to_string()
            }
            Rule::Email => "Invalid email format".to_string(),
            Rule::Url => "URL must start with http:// or https://".to_string(),
            Rule::Integer => "Must be a whole number".to_string(),
            Rule::Decimal => "Must be a decimal number".to_string(),
            Rule::Color => "Invalid color format (#RRGGBB)".to_string(),
            Rule::Json => "Invalid JSON format".to_string(),
            Rule::Category => "Unknown category".to_string(),
            Rule::ValueType => "Unknown value type".to_string(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One rule failed for one field
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{label}: {message}")]
#[diagnostic(code(setwiz::validation::field))]
pub struct FieldValidationError {
    /// Canonical field name
    pub field: String,
    /// Display label of the field
    pub label: String,
    /// Name of the failing rule
    pub rule: String,
    pub message: String,
}

/// Outcome of evaluating one rule against one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub rule: String,
    pub passed: bool,
    /// Empty when the rule passed
    pub message: String,
}

/// Stateless rule evaluator
pub struct Validator;

impl Validator {
    /// Evaluate a rule by name. Unknown rule names pass.
    pub fn validate(rule_name: &str, raw: &str) -> bool {
        match Rule::from_name(rule_name) {
            Some(rule) => rule.check(raw),
            None => true,
        }
    }

    /// Message for a rule name, with the generic fallback for unknown names
    pub fn message_for(rule_name: &str, label: &str) -> String {
        Rule::from_name(rule_name)
            .map(|rule| rule.message(label))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }

    /// Evaluate `rules` in order, stopping at the first failure
    pub fn evaluate(
        field: &str,
        label: &str,
        rules: &[Rule],
        raw: &str,
    ) -> Result<(), FieldValidationError> {
        match rules.iter().find(|rule| !rule.check(raw)) {
            Some(rule) => Err(FieldValidationError {
                field: field.to_string(),
                label: label.to_string(),
                rule: rule.name().to_string(),
                message: rule.message(label),
            }),
            None => Ok(()),
        }
    }

    /// Like `evaluate`, with a character limit checked right after the
    /// leading `required` rules
    pub fn evaluate_with_limit(
        field: &str,
        label: &str,
        rules: &[Rule],
        max_length: Option<usize>,
        raw: &str,
    ) -> Result<(), FieldValidationError> {
        let leading = rules.iter().take_while(|r| **r == Rule::Required).count();
        let (required, rest) = rules.split_at(leading);
        Self::evaluate(field, label, required, raw)?;

        if let Some(max) = max_length {
            if raw.chars().count() > max {
                return Err(FieldValidationError {
                    field: field.to_string(),
                    label: label.to_string(),
                    rule: MAX_LENGTH_RULE.to_string(),
                    message: format!("{} must be at most {} characters", label, max),
                });
            }
        }
        Self::evaluate(field, label, rest, raw)
    }

    /// Per-rule results up to and including the first failure
    pub fn results(label: &str, rules: &[Rule], raw: &str) -> Vec<RuleResult> {
        let mut results = Vec::with_capacity(rules.len());
        for rule in rules {
            let passed = rule.check(raw);
            results.push(RuleResult {
                rule: rule.name().to_string(),
                passed,
                message: if passed { String::new() } else { rule.message(label) },
            });
            if !passed {
                break;
            }
        }
        results
    }
}

/// Parse a comma-separated rule list such as `"required, key-format"`.
///
/// Unknown names are dropped; they would always pass anyway.
pub fn parse_rule_list(list: &str) -> Vec<Rule> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let rule = Rule::from_name(name);
            if rule.is_none() {
                tracing::debug!(rule = name, "dropping unknown validation rule");
            }
            rule
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert!(Validator::validate("required", "x"));
        assert!(!Validator::validate("required", ""));
        assert!(!Validator::validate("required", "   \t"));
    }

    #[test]
    fn test_key_format() {
        assert!(Validator::validate("key-format", "mail.smtp_host-2"));
        assert!(!Validator::validate("key-format", "2fast"));
        assert!(!Validator::validate("key-format", ""));
        assert!(!Validator::validate("key-format", "has space"));
    }

    #[test]
    fn test_color() {
        assert!(Validator::validate("color", "#0D6EFD"));
        assert!(Validator::validate("color", "#0d6efd"));
        assert!(!Validator::validate("color", "#0D6EF"));
        assert!(!Validator::validate("color", "0D6EFD"));
        assert!(!Validator::validate("color", "#0D6EFDA"));
        assert!(Validator::validate("color", ""));
    }

    #[test]
    fn test_json() {
        assert!(Validator::validate("json", r#"{"a":1}"#));
        assert!(Validator::validate("json", "[1, 2]"));
        assert!(!Validator::validate("json", "{a:1}"));
        assert!(Validator::validate("json", ""));
    }

    #[test]
    fn test_integer() {
        assert!(Validator::validate("integer", "42"));
        assert!(Validator::validate("integer", "-10"));
        assert!(!Validator::validate("integer", "4.2"));
        assert!(!Validator::validate("integer", "abc"));
        assert!(Validator::validate("integer", ""));
    }

    #[test]
    fn test_decimal() {
        assert!(Validator::validate("decimal", "3.14"));
        assert!(Validator::validate("decimal", "-19.6"));
        assert!(Validator::validate("decimal", "42"));
        assert!(Validator::validate("decimal", ".5"));
        assert!(!Validator::validate("decimal", "3."));
        assert!(!Validator::validate("decimal", "1,5"));
    }

    #[test]
    fn test_email_and_url() {
        assert!(Validator::validate("email", "admin@example.com"));
        assert!(!Validator::validate("email", "admin@example"));
        assert!(!Validator::validate("email", "ad min@example.com"));
        assert!(Validator::validate("url", "https://example.com"));
        assert!(Validator::validate("url", "http://x"));
        assert!(!Validator::validate("url", "http://"));
        assert!(!Validator::validate("url", "ftp://example.com"));
        assert!(Validator::validate("url", ""));
    }

    #[test]
    fn test_unknown_rule_passes_with_fallback_message() {
        assert!(Validator::validate("no-such-rule", "anything"));
        assert_eq!(Validator::message_for("no-such-rule", "Key"), FALLBACK_MESSAGE);
        assert_eq!(Validator::message_for("required", "Key"), "Key is required");
    }

    #[test]
    fn test_evaluate_reports_first_failure() {
        let rules = [Rule::Required, Rule::KeyFormat];
        let err = Validator::evaluate("key", "Key", &rules, "").unwrap_err();
        assert_eq!(err.rule, "required");
        assert_eq!(err.message, "Key is required");

        let err = Validator::evaluate("key", "Key", &rules, "9lives").unwrap_err();
        assert_eq!(err.rule, "key-format");

        assert!(Validator::evaluate("key", "Key", &rules, "app.name").is_ok());
        assert!(Validator::evaluate("notes", "Notes", &[], "").is_ok());
    }

    #[test]
    fn test_results_short_circuit() {
        let rules = [Rule::Required, Rule::Integer, Rule::Decimal];
        let results = Validator::results("Order", &rules, "abc");
        assert_eq!(results.len(), 2);
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert_eq!(results[1].message, "Must be a whole number");
    }

    #[test]
    fn test_category_and_value_type_membership() {
        assert!(Validator::validate("category", "SECURITY"));
        assert!(Validator::validate("category", ""));
        assert!(!Validator::validate("category", "NOPE"));
        assert!(Validator::validate("value-type", "FILE_PATH"));
        assert!(!Validator::validate("value-type", "CURRENCY"));
        assert_eq!(Validator::message_for("value-type", "Value type"), "Unknown value type");
    }

    #[test]
    fn test_length_limit_checked_after_required() {
        let rules = [Rule::Required, Rule::KeyFormat];
        let err = Validator::evaluate_with_limit("key", "Key", &rules, Some(3), "").unwrap_err();
        assert_eq!(err.rule, "required");

        let err = Validator::evaluate_with_limit("key", "Key", &rules, Some(3), "9lives").unwrap_err();
        assert_eq!(err.rule, MAX_LENGTH_RULE);
        assert_eq!(err.message, "Key must be at most 3 characters");

        let err = Validator::evaluate_with_limit("key", "Key", &rules, Some(3), "9ab").unwrap_err();
        assert_eq!(err.rule, "key-format");

        // Characters, not bytes
        assert!(Validator::evaluate_with_limit("d", "D", &[], Some(3), "äöü").is_ok());
        assert!(Validator::evaluate_with_limit("d", "D", &[], None, "long enough").is_ok());
    }

    #[test]
    fn test_parse_rule_list() {
        let rules = parse_rule_list("required, key-format,,bogus ,color");
        assert_eq!(rules, vec![Rule::Required, Rule::KeyFormat, Rule::Color]);
        assert!(parse_rule_list("").is_empty());
    }
}
