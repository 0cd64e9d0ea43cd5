//! Logging and observability
//!
//! Structured logging with configurable levels, console output and
//! optional rotating JSON log files.
//!
//! # Example
//!
//! ```no_run
//! use docket::logging::init_logging;
//! use docket::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a partition export
///
/// # Example
///
/// ```no_run
/// use docket::log_partition_start;
/// use docket::domain::CustodianName;
///
/// let custodian = CustodianName::new("Jones").unwrap();
/// log_partition_start!(&custodian, 12);
/// ```
#[macro_export]
macro_rules! log_partition_start {
    ($custodian:expr, $count:expr) => {
        tracing::info!(
            custodian = %$custodian,
            items = $count,
            "Exporting custodian partition"
        );
    };
}

/// Log the completion of an export job
///
/// # Example
///
/// ```no_run
/// use docket::log_job_complete;
/// use std::time::Duration;
///
/// log_job_complete!(42, 3, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_job_complete {
    ($exported:expr, $partitions:expr, $duration:expr) => {
        tracing::info!(
            exported = $exported,
            partitions = $partitions,
            duration_ms = $duration.as_millis() as u64,
            "Export job finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use docket::log_error_with_context;
/// use docket::domain::DocketError;
///
/// let error = DocketError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
