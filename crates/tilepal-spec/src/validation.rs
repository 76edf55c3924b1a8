//! Common validation utilities for palette parameters and asset names.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that an integer parameter is positive (> 0).
///
/// # Example
/// ```
/// use tilepal_spec::validation::validate_positive;
///
/// assert!(validate_positive("stride", 4).is_ok());
/// assert!(validate_positive("stride", 0).is_err());
/// ```
pub fn validate_positive(name: &str, value: u32) -> Result<(), CommonValidationError> {
    if value == 0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is finite and non-negative (>= 0).
///
/// # Example
/// ```
/// use tilepal_spec::validation::validate_non_negative;
///
/// assert!(validate_non_negative("min_speed", 2.0).is_ok());
/// assert!(validate_non_negative("min_speed", -1.0).is_err());
/// assert!(validate_non_negative("min_speed", f32::NAN).is_err());
/// ```
pub fn validate_non_negative(name: &str, value: f32) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if value < 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that `min <= max`.
pub fn validate_range(
    min_name: &str,
    min: f32,
    max_name: &str,
    max: f32,
) -> Result<(), CommonValidationError> {
    if min > max {
        return Err(CommonValidationError::new(format!(
            "{} ({}) must not exceed {} ({})",
            min_name, min, max_name, max
        )));
    }
    Ok(())
}

/// Checks whether a generated asset name can be used as a single path segment.
///
/// Names come from sheet file stems, so anything that would escape the
/// destination directory or create nested folders is rejected.
pub fn is_safe_asset_name(name: &str) -> bool {
    asset_name_errors(name).is_empty()
}

/// Returns every reason `name` is unusable as an asset name.
pub fn asset_name_errors(name: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push("asset name cannot be empty".to_string());
        return errors;
    }

    if name.contains('/') || name.contains('\\') {
        errors.push(format!(
            "asset name must not contain path separators: '{}'",
            name
        ));
    }

    if name == "." || name == ".." {
        errors.push(format!("asset name must not be a relative path: '{}'", name));
    }

    if name.chars().any(|c| c.is_control()) {
        errors.push(format!(
            "asset name must not contain control characters: '{}'",
            name.escape_debug()
        ));
    }

    errors
}
