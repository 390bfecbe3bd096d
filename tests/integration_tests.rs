//! Integration tests for the setwiz CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! Stdin is never a terminal here, so form commands run non-interactively.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a setwiz command isolated from the user's configuration
fn setwiz(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("setwiz").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("SETWIZ_SUMMARY_LIMIT")
        .env_remove("SETWIZ_DEFAULT_COLOR")
        .env_remove("SETWIZ_REQUIRE_VALUE")
        .env_remove("SETWIZ_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_record(tmp: &TempDir, name: &str, content: &str) {
    fs::write(tmp.path().join(name), content).unwrap();
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setting records"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("setwiz"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp).arg("frobnicate").assert().failure();
}

// ============================================================================
// Value Type Tests
// ============================================================================

#[test]
fn test_types_lists_every_value_type() {
    let tmp = TempDir::new().unwrap();
    let assert = setwiz(&tmp).arg("types").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for tag in [
        "STRING", "TEXT", "INTEGER", "DECIMAL", "BOOLEAN", "EMAIL", "URL", "PASSWORD", "COLOR",
        "DATE", "TIME", "JSON", "FILE_PATH", "LIST",
    ] {
        assert!(stdout.contains(tag), "missing {}", tag);
    }
}

#[test]
fn test_describe_integer() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["describe", "INTEGER"])
        .assert()
        .success()
        .stdout(predicate::str::contains("number"))
        .stdout(predicate::str::contains("integer"));
}

#[test]
fn test_describe_html_color() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["describe", "color", "--html", "--value", "#112233"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"type="color""#))
        .stdout(predicate::str::contains(r#"data-validation="color""#));
}

#[test]
fn test_describe_unknown_type_falls_back() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["describe", "CURRENCY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("single-line"))
        .stderr(predicate::str::contains("Unknown value type"));
}

#[test]
fn test_preview_password_is_masked() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["preview", "PASSWORD", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("••••••••"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_preview_list_json() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["preview", "LIST", "red, green,,blue", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "chips""#))
        .stdout(predicate::str::contains(r#""blue""#));
}

#[test]
fn test_preview_invalid_json() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["preview", "JSON", "{broken"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid JSON"));
}

// ============================================================================
// Validate Command Tests
// ============================================================================

#[test]
fn test_validate_passes() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["validate", "required,email", "ops@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_validate_reports_message() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["validate", "email", "not-an-email"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid email format"));
}

#[test]
fn test_validate_empty_value_passes_type_rules() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp).args(["validate", "email,url,color", ""]).assert().success();
}

#[test]
fn test_validate_unknown_rule_passes() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["validate", "shiny", "anything"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown rule 'shiny'"));
}

// ============================================================================
// New / Edit Command Tests
// ============================================================================

#[test]
fn test_new_prints_yaml() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["new", "--no-input", "--key", "app.name", "--value", "Shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("key: app.name"))
        .stdout(predicate::str::contains("value: Shop"));
}

#[test]
fn test_new_without_key_is_blocked() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["new", "--no-input", "--value", "Shop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key is required"));
}

#[test]
fn test_new_invalid_email_is_blocked() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args([
            "new", "--no-input", "--key", "mail.from", "--type", "EMAIL", "--value", "nobody",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email format"));
}

#[test]
fn test_new_writes_file_that_checks_clean() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args([
            "new",
            "--no-input",
            "--key",
            "ui.accent",
            "--category",
            "APPEARANCE",
            "--type",
            "COLOR",
            "--set",
            "sortOrder=4",
            "-o",
            "accent.json",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("accent.json")).unwrap();
    // Empty COLOR inputs are seeded with the default color
    assert!(content.contains("#0d6efd"));
    assert!(content.contains(r#""sort_order": 4"#));

    setwiz(&tmp).args(["check", "accent.json"]).assert().success();
}

#[test]
fn test_new_boolean_is_normalized() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["new", "--no-input", "--key", "feature.beta", "--type", "BOOLEAN", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value": "false""#));
}

#[test]
fn test_edit_updates_file_in_place() {
    let tmp = TempDir::new().unwrap();
    write_record(
        &tmp,
        "port.yaml",
        "key: mail.smtp.port\ncategory: EMAIL\nvalue_type: INTEGER\nvalue: \"25\"\n",
    );

    setwiz(&tmp)
        .args(["edit", "port.yaml", "--no-input", "--set", "value=587"])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("port.yaml")).unwrap();
    assert!(content.contains("587"));
    assert!(content.contains("EMAIL"));
}

#[test]
fn test_edit_type_change_revalidates_value() {
    let tmp = TempDir::new().unwrap();
    write_record(&tmp, "name.yaml", "key: app.name\nvalue: Shop\n");

    setwiz(&tmp)
        .args(["edit", "name.yaml", "--no-input", "--set", "valueType=INTEGER"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must be a whole number"));

    // Nothing written on failure
    let content = fs::read_to_string(tmp.path().join("name.yaml")).unwrap();
    assert_eq!(content, "key: app.name\nvalue: Shop\n");
}

#[test]
fn test_edit_rejects_unknown_field() {
    let tmp = TempDir::new().unwrap();
    write_record(&tmp, "name.yaml", "key: app.name\nvalue: Shop\n");

    setwiz(&tmp)
        .args(["edit", "name.yaml", "--no-input", "--set", "colour=red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field"));
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn test_check_directory_reports_failures() {
    let tmp = TempDir::new().unwrap();
    write_record(&tmp, "good.yaml", "key: app.name\nvalue: Shop\n");
    write_record(
        &tmp,
        "bad_value.yaml",
        "key: site.url\nvalue_type: URL\nvalue: ftp://example.com\n",
    );
    write_record(&tmp, "bad_schema.yaml", "key: app.name\nvalue_type: CURRENCY\n");

    setwiz(&tmp)
        .args(["check", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Files checked:  3"))
        .stdout(predicate::str::contains("URL must start with http:// or https://"));
}

#[test]
fn test_check_lists_display_values() {
    let tmp = TempDir::new().unwrap();
    write_record(
        &tmp,
        "password.yaml",
        "key: smtp.password\nvalue_type: PASSWORD\nvalue: hunter2\n",
    );
    write_record(
        &tmp,
        "beta.yaml",
        "key: feature.beta\nvalue_type: BOOLEAN\nvalue: \"true\"\n",
    );

    setwiz(&tmp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("smtp.password = ••••••••"))
        .stdout(predicate::str::contains("feature.beta = ✓ Enabled"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_new_rejects_unknown_category_and_type() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args([
            "new", "--no-input", "--key", "shop.currency", "--category", "NOPE", "--type",
            "CURRENCY",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown category"))
        .stderr(predicate::str::contains("Unknown value type"));
}

#[test]
fn test_new_rejects_over_long_key() {
    let tmp = TempDir::new().unwrap();
    let key = "k".repeat(150);
    setwiz(&tmp)
        .args(["new", "--no-input", "--key", key.as_str(), "-o", "long.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key must be at most 100 characters"));
    assert!(!tmp.path().join("long.yaml").exists());
}

#[test]
fn test_check_skips_local_config() {
    let tmp = TempDir::new().unwrap();
    write_record(&tmp, ".setwiz.yaml", "summary_limit: 20\n");
    write_record(&tmp, "good.yaml", "key: app.name\nvalue: Shop\n");

    setwiz(&tmp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked:  1"));
}

#[test]
fn test_check_reports_syntax_error() {
    let tmp = TempDir::new().unwrap();
    write_record(&tmp, "broken.json", "{\"key\": ");

    setwiz(&tmp)
        .args(["check", "broken.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("broken.json"));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_keys() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("summary_limit"))
        .stdout(predicate::str::contains("require_value"));
}

#[test]
fn test_config_local_file_is_read() {
    let tmp = TempDir::new().unwrap();
    write_record(&tmp, ".setwiz.yaml", "summary_limit: 12\n");

    setwiz(&tmp)
        .args(["config", "show", "summary_limit"])
        .assert()
        .success()
        .stdout(predicate::str::diff("12\n"));
}

#[test]
fn test_config_set_then_show() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["config", "set", "default_color", "#ff0000"])
        .assert()
        .success();

    setwiz(&tmp)
        .args(["config", "show", "default_color"])
        .assert()
        .success()
        .stdout(predicate::str::diff("#ff0000\n"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_require_value_from_env() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .env("SETWIZ_REQUIRE_VALUE", "1")
        .args(["new", "--no-input", "--key", "app.name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Value is required"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    setwiz(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("setwiz"));
}
