//! JSON output types for machine-readable CLI output.
//!
//! `validate` and `hash` emit these envelopes with `--json`; `run`, `sweep`
//! and `compare` emit the engine results directly on success and a
//! [`FailureOutput`] on error.

use serde::{Deserialize, Serialize};
use twinstudio_spec::ValidationError;

/// Error codes for CLI operations.
///
/// Validation errors pass through their own `E0xx` codes.
pub mod error_codes {
    /// File could not be read or parsed
    pub const INPUT: &str = "CLI_001";
    /// Engine failure other than validation
    pub const ENGINE: &str = "CLI_002";
}

/// A structured error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(e: &ValidationError) -> Self {
        Self {
            code: e.code.code().to_string(),
            message: e.message.clone(),
            path: e.path.clone(),
        }
    }
}

/// Converts validation errors to JSON errors.
pub fn validation_errors_to_json(errors: &[ValidationError]) -> Vec<JsonError> {
    errors.iter().map(JsonError::from).collect()
}

/// JSON output of a failed command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureOutput {
    /// Always false
    pub success: bool,
    /// Errors
    pub errors: Vec<JsonError>,
}

impl FailureOutput {
    /// Creates a failure output.
    pub fn new(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Trial id of the request (if it parsed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_id: Option<String>,
    /// Canonical request digest (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_digest: Option<String>,
    /// BLAKE3 hash of the source text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// JSON output for the `hash` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashOutput {
    /// Canonical request string
    pub canonical: String,
    /// Synthesis seed derived from the canonical string
    pub seed: u32,
    /// Synthesis seed as 8 hex digits
    pub seed_hex: String,
    /// Sweep seed (run kind forced to `sweep`)
    pub sweep_seed: u32,
    /// BLAKE3 digest of the canonical string
    pub request_digest: String,
}

/// One entry of the `presets` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroEntry {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// JSON output for the `presets` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsOutput {
    pub presets: Vec<String>,
    pub macros: Vec<MacroEntry>,
}

/// Serializes `value` as compact or pretty JSON.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
