//! Integration tests for configuration loading and validation
//!
//! Every test takes ENV_MUTEX since overrides are read from the process
//! environment.

use docket::config::{load_config, NamingScheme, ReorganizeMode};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "DOCKET_APPLICATION_LOG_LEVEL",
        "DOCKET_EXPORT_DIRECTORY",
        "DOCKET_EXPORT_NAMING",
        "DOCKET_EXPORT_PRODUCT",
        "DOCKET_EXPORT_PER_PARTITION_DESTINATION",
        "DOCKET_STORE_MANIFEST",
        "DOCKET_STORE_SELECTION",
        "DOCKET_ENGINE_PROGRAM",
        "DOCKET_ENGINE_TIMEOUT_SECS",
        "DOCKET_LOGGING_LOCAL_ENABLED",
        "DOCKET_LOGGING_LOCAL_PATH",
        "TEST_DOCKET_CASE_ROOT",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const MINIMAL: &str = r#"
[store]
manifest = "case.json"

[engine]
program = "batch-export"
"#;

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[export]
directory = "/cases/42/export"
items_dir = "Natives"
reports_dir = "Custodians"
naming = "item_name_with_path"
product = "native"
mail_format = "msg"
details_label = "Production"
per_partition_destination = true

[reorganize]
mode = "whitelist"
artifacts = ["summary-report.xml"]
message_store_prefix = "Mailbox"
message_store_extension = "pst"

[report]
document_name = "export-summary.xml"
root_element = "Nuix"
platform_version = "9.10"
append_artifacts = ["top-level-MD5-digests.txt", "loadfile.opt"]
header_artifacts = ["loadfile.dat"]

[store]
manifest = "/cases/42/case.json"
selection = "/cases/42/selection.txt"

[engine]
program = "batch-export"
args = ["--dest", "{destination}", "--path", "{path}"]
timeout_secs = 600

[logging]
local_enabled = true
local_path = "/var/log/docket"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.export.directory.as_deref(), Some(Path::new("/cases/42/export")));
    assert_eq!(config.export.items_dir, "Natives");
    assert_eq!(config.export.naming, NamingScheme::ItemNameWithPath);
    assert_eq!(config.export.details_label, "Production");
    assert!(config.export.per_partition_destination);
    assert_eq!(config.reorganize.mode, ReorganizeMode::Whitelist);
    assert_eq!(config.reorganize.message_store_prefix, "Mailbox");
    assert_eq!(config.report.document_name, "export-summary.xml");
    assert_eq!(config.report.platform_version.as_deref(), Some("9.10"));
    assert_eq!(config.report.append_artifacts.len(), 2);
    assert_eq!(config.store.selection.as_deref(), Some(Path::new("/cases/42/selection.txt")));
    assert_eq!(config.engine.args.len(), 4);
    assert_eq!(config.engine.timeout_secs, Some(600));
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(MINIMAL);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(config.export.directory.is_none());
    assert_eq!(config.export.items_dir, "Items");
    assert_eq!(config.export.reports_dir, "Reports");
    assert_eq!(config.export.naming, NamingScheme::ItemName);
    assert_eq!(config.export.details_label, "Custodian");
    assert!(!config.export.per_partition_destination);
    assert_eq!(config.reorganize.mode, ReorganizeMode::AllFiles);
    assert_eq!(config.report.document_name, "summary-report.xml");
    assert_eq!(config.report.header_artifacts, vec!["loadfile.dat".to_string()]);
    assert!(config.engine.timeout_secs.is_none());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_DOCKET_CASE_ROOT", "/cases/99");

    let file = write_config(
        r#"
[export]
directory = "${TEST_DOCKET_CASE_ROOT}/export"

[store]
manifest = "${TEST_DOCKET_CASE_ROOT}/case.json"

[engine]
program = "batch-export"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.export.directory.as_deref(), Some(Path::new("/cases/99/export")));
    assert_eq!(config.store.manifest, Path::new("/cases/99/case.json"));
    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[store]
manifest = "${TEST_DOCKET_CASE_ROOT}/case.json"

[engine]
program = "batch-export"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_DOCKET_CASE_ROOT"));
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("DOCKET_EXPORT_DIRECTORY", "/override/export");
    std::env::set_var("DOCKET_EXPORT_NAMING", "item_name_with_path");
    std::env::set_var("DOCKET_ENGINE_TIMEOUT_SECS", "30");
    std::env::set_var("DOCKET_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("DOCKET_EXPORT_PER_PARTITION_DESTINATION", "true");

    let file = write_config(MINIMAL);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.export.directory.as_deref(), Some(Path::new("/override/export")));
    assert_eq!(config.export.naming, NamingScheme::ItemNameWithPath);
    assert_eq!(config.engine.timeout_secs, Some(30));
    assert_eq!(config.application.log_level, "warn");
    assert!(config.export.per_partition_destination);
    cleanup_env_vars();
}

#[test]
fn test_invalid_naming_override() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("DOCKET_EXPORT_NAMING", "by_path");

    let file = write_config(MINIMAL);
    assert!(load_config(file.path()).is_err());
    cleanup_env_vars();
}

#[test]
fn test_validation_errors() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        // Missing engine section
        "[store]\nmanifest = \"case.json\"\n",
        // Empty program
        "[store]\nmanifest = \"case.json\"\n[engine]\nprogram = \"\"\n",
        // Zero timeout
        "[store]\nmanifest = \"case.json\"\n[engine]\nprogram = \"x\"\ntimeout_secs = 0\n",
        // Unknown rotation
        "[store]\nmanifest = \"case.json\"\n[engine]\nprogram = \"x\"\n[logging]\nlocal_rotation = \"size\"\n",
        // Unknown naming scheme
        "[export]\nnaming = \"flat\"\n[store]\nmanifest = \"case.json\"\n[engine]\nprogram = \"x\"\n",
    ] {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}

#[test]
fn test_missing_config_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let err = load_config("/nonexistent/docket.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
