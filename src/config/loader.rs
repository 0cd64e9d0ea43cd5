//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DocketConfig, NamingScheme};
use crate::domain::errors::DocketError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DocketConfig
/// 4. Applies environment variable overrides (DOCKET_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use docket::config::loader::load_config;
///
/// let config = load_config("docket.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DocketConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DocketError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DocketError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DocketConfig = toml::from_str(&contents)
        .map_err(|e| DocketError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DocketError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DocketError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DocketError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using DOCKET_* prefix
///
/// Environment variables follow the pattern: DOCKET_<SECTION>_<KEY>
/// For example: DOCKET_EXPORT_DIRECTORY, DOCKET_ENGINE_PROGRAM
fn apply_env_overrides(config: &mut DocketConfig) -> Result<()> {
    if let Ok(val) = std::env::var("DOCKET_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("DOCKET_EXPORT_DIRECTORY") {
        config.export.directory = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("DOCKET_EXPORT_NAMING") {
        config.export.naming = match val.as_str() {
            "item_name" => NamingScheme::ItemName,
            "item_name_with_path" => NamingScheme::ItemNameWithPath,
            other => {
                return Err(DocketError::Configuration(format!(
                    "Invalid DOCKET_EXPORT_NAMING '{other}'. Must be one of: item_name, item_name_with_path"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("DOCKET_EXPORT_PRODUCT") {
        config.export.product = val;
    }
    if let Ok(val) = std::env::var("DOCKET_EXPORT_PER_PARTITION_DESTINATION") {
        config.export.per_partition_destination = val.parse().map_err(|_| {
            DocketError::Configuration(format!(
                "Invalid DOCKET_EXPORT_PER_PARTITION_DESTINATION '{val}'. Must be true or false"
            ))
        })?;
    }

    // Store overrides
    if let Ok(val) = std::env::var("DOCKET_STORE_MANIFEST") {
        config.store.manifest = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("DOCKET_STORE_SELECTION") {
        config.store.selection = Some(PathBuf::from(val));
    }

    // Engine overrides
    if let Ok(val) = std::env::var("DOCKET_ENGINE_PROGRAM") {
        config.engine.program = val;
    }
    if let Ok(val) = std::env::var("DOCKET_ENGINE_TIMEOUT_SECS") {
        if let Ok(secs) = val.parse() {
            config.engine.timeout_secs = Some(secs);
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DOCKET_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DOCKET_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DOCKET_LOADER_TEST_VAR", "test_value");
        let input = "program = \"${DOCKET_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "program = \"test_value\"\n");
        std::env::remove_var("DOCKET_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DOCKET_LOADER_MISSING_VAR");
        let input = "program = \"${DOCKET_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("DOCKET_LOADER_COMMENTED_VAR");
        let input = "# program = \"${DOCKET_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${DOCKET_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[export]
directory = "/cases/1234/export"
naming = "item_name_with_path"

[store]
manifest = "/cases/1234/case.json"

[engine]
program = "batch-export"
args = ["--dest", "{destination}", "--path", "{path}"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(
            config.export.directory,
            Some(PathBuf::from("/cases/1234/export"))
        );
        assert_eq!(config.export.naming, NamingScheme::ItemNameWithPath);
        assert_eq!(config.export.items_dir, "Items");
        assert_eq!(config.engine.args.len(), 4);
        assert_eq!(config.report.document_name, "summary-report.xml");
    }

    #[test]
    fn test_load_config_invalid_values() {
        let toml_content = r#"
[application]
log_level = "loud"

[store]
manifest = "case.json"

[engine]
program = "batch-export"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }
}
