//! Common numeric validation helpers.
//!
//! These helpers only report; they never clamp the value they inspect.

use std::fmt;

/// What kind of rule a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The value is NaN or infinite.
    NonFinite,
    /// The value is finite but outside the allowed range.
    OutOfRange,
}

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    pub kind: ViolationKind,
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    fn non_finite(name: &str, value: f64) -> Self {
        Self {
            kind: ViolationKind::NonFinite,
            message: format!("{} must be finite, got {}", name, value),
        }
    }

    fn out_of_range(message: String) -> Self {
        Self {
            kind: ViolationKind::OutOfRange,
            message,
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a value is finite.
///
/// # Example
/// ```
/// use twinstudio_spec::validation::common::validate_finite;
///
/// assert!(validate_finite("t0_ms", 0.0).is_ok());
/// assert!(validate_finite("t0_ms", f64::NAN).is_err());
/// ```
pub fn validate_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::non_finite(name, value));
    }
    Ok(())
}

/// Validate that a value is finite and within `[min, max]`.
///
/// # Example
/// ```
/// use twinstudio_spec::validation::common::validate_range;
///
/// assert!(validate_range("jitter_ms", 10.0, 0.0, 50.0).is_ok());
/// assert!(validate_range("jitter_ms", 51.0, 0.0, 50.0).is_err());
/// ```
pub fn validate_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value < min || value > max {
        return Err(CommonValidationError::out_of_range(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

/// Validate that a value is in [0, 1] (the unit interval).
pub fn validate_unit_interval(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_range(name, value, 0.0, 1.0)
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use twinstudio_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("horizon_ms", 1800.0).is_ok());
/// assert!(validate_positive("horizon_ms", 0.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::out_of_range(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}
