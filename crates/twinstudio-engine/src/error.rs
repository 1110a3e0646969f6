//! Error types for the synthesis engine.

use thiserror::Error;
use twinstudio_spec::{SpecError, ValidationError};

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during synthesis.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Validation, canonicalization or serialization failure.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A scenario variant failed to synthesize.
    #[error("variant '{variant_id}': {source}")]
    Variant {
        /// Variant id.
        variant_id: String,
        /// Underlying error.
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Wraps an error with the variant that produced it.
    pub fn variant(variant_id: impl Into<String>, source: EngineError) -> Self {
        Self::Variant {
            variant_id: variant_id.into(),
            source: Box::new(source),
        }
    }

    /// Returns a stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Spec(SpecError::ValidationFailed(_)) => "ENGINE_001",
            EngineError::Spec(_) => "ENGINE_002",
            EngineError::Variant { .. } => "ENGINE_003",
        }
    }

    /// Returns the validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            EngineError::Spec(e) => e.validation_errors(),
            EngineError::Variant { source, .. } => source.validation_errors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinstudio_spec::ErrorCode;

    #[test]
    fn test_validation_errors_pass_through_variant() {
        let inner = EngineError::from(SpecError::ValidationFailed(vec![ValidationError::new(
            ErrorCode::ValueOutOfRange,
            "jitter_ms must be in [0, 50], got 80",
        )]));
        assert_eq!(inner.code(), "ENGINE_001");

        let err = EngineError::variant("variant_b", inner);
        assert_eq!(err.code(), "ENGINE_003");
        assert_eq!(err.validation_errors().len(), 1);
        assert!(err.to_string().contains("variant_b"));
    }
}
