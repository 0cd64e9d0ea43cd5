//! Domain error types
//!
//! This module defines the error hierarchy for Docket.
//! All errors are domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main Docket error type
///
/// This is the primary error type used throughout the application.
/// Failures that should terminate a job (engine, file system) are carried
/// here; a missing custodian is reported as a job outcome instead.
#[derive(Debug, Error)]
pub enum DocketError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Item store (case database) errors
    #[error("Item store error: {0}")]
    Store(String),

    /// The external batch-export engine failed
    #[error("Export engine error: {0}")]
    ExportEngine(String),

    /// A per-partition report document could not be parsed
    #[error("Malformed report {}: {reason}", path.display())]
    MalformedReport {
        /// Path of the offending document
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// File system reorganization errors (missing source, directory creation)
    #[error("File system error: {0}")]
    FileSystem(String),

    /// XML writing errors
    #[error("XML error: {0}")]
    Xml(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl DocketError {
    /// Creates a `MalformedReport` error for a document path
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DocketError::MalformedReport {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an I/O failure on a specific path as a file system error
    pub fn file_system(action: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        DocketError::FileSystem(format!("Failed to {action} {}: {err}", path.display()))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for DocketError {
    fn from(err: std::io::Error) -> Self {
        DocketError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DocketError {
    fn from(err: serde_json::Error) -> Self {
        DocketError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DocketError {
    fn from(err: toml::de::Error) -> Self {
        DocketError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from quick-xml writer errors
impl From<quick_xml::Error> for DocketError {
    fn from(err: quick_xml::Error) -> Self {
        DocketError::Xml(err.to_string())
    }
}
