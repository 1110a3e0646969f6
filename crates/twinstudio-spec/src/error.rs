//! Error types for request validation and processing.

use thiserror::Error;

/// Error codes for request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request errors (E001-E006)
    /// E001: Trial identifier is empty or malformed
    InvalidTrialId,
    /// E002: Numeric field is NaN or infinite
    NonFiniteValue,
    /// E003: Numeric field outside its domain range
    ValueOutOfRange,
    /// E004: Channel mask selects no channels
    EmptyChannelMask,
    /// E005: Explicit channel id is not a known channel
    UnknownChannel,
    /// E006: Secondary channel enabled without any gains
    EmptyGainVector,

    // Scenario errors (E007-E009)
    /// E007: Scenario horizon is not a positive duration
    InvalidHorizon,
    /// E008: Two variants share an id
    DuplicateVariantId,
    /// E009: Variant id is empty or malformed
    InvalidVariantId,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidTrialId => "E001",
            ErrorCode::NonFiniteValue => "E002",
            ErrorCode::ValueOutOfRange => "E003",
            ErrorCode::EmptyChannelMask => "E004",
            ErrorCode::UnknownChannel => "E005",
            ErrorCode::EmptyGainVector => "E006",
            ErrorCode::InvalidHorizon => "E007",
            ErrorCode::DuplicateVariantId => "E008",
            ErrorCode::InvalidVariantId => "E009",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "recipe.emg.gain\[2\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for request operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Validation failed with one or more errors.
    #[error("validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Canonicalization error.
    #[error("canonicalization error: {0}")]
    Canonicalization(String),

    /// A recipe patch does not fit the recipe schema.
    #[error("recipe patch rejected: {0}")]
    Merge(String),
}

impl SpecError {
    /// Returns the validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SpecError::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }
}

/// Result of request validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self { ok: false, errors }
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if validation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.ok = false;
        self.errors.push(error);
    }

    /// Appends every error from another result.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
    }

    /// Converts the result into `Ok(())` or `SpecError::ValidationFailed`.
    pub fn into_result(self) -> Result<(), SpecError> {
        if self.ok {
            Ok(())
        } else {
            Err(SpecError::ValidationFailed(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
