//! Result type alias for Docket

use super::errors::DocketError;

/// Result type alias for Docket operations
///
/// # Examples
///
/// ```
/// use docket::domain::result::Result;
/// use docket::domain::errors::DocketError;
///
/// fn failing_function() -> Result<()> {
///     Err(DocketError::Validation("Invalid input".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, DocketError>;
