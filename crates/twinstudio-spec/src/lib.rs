//! TwinStudio Request Library
//!
//! This crate provides types, validation, and hashing for TwinStudio run
//! requests. A request describes one deterministic synthesis run: a trial,
//! a time window, a signal-processing recipe, a seed and a run kind.
//!
//! # Overview
//!
//! - **Request**: `trial_id`, `mode`, `window`, `seed`, `run_kind` and an
//!   optional calibration tag
//! - **Recipe**: EEG, EMG, sync, prior and output parameters
//! - **Result**: the immutable snapshot the engine produces for a request
//!
//! # Example
//!
//! ```
//! use twinstudio_spec::{Recipe, RunKind, RunRequest};
//! use twinstudio_spec::validation::validate_request;
//! use twinstudio_spec::hash::{canonical_request_hash, request_seed};
//!
//! let request = RunRequest::builder("trial_001")
//!     .window(0.0, 1200.0)
//!     .recipe(Recipe::default())
//!     .seed(42)
//!     .run_kind(RunKind::Preview)
//!     .build();
//!
//! assert!(validate_request(&request).is_ok());
//!
//! // The seed is a pure function of the canonical request.
//! let seed = request_seed(&request).unwrap();
//! assert_eq!(seed, request_seed(&request.clone()).unwrap());
//!
//! let digest = canonical_request_hash(&request).unwrap();
//! assert_eq!(digest.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types and validation results
//! - [`hash`]: Canonicalization, seed derivation and digests
//! - [`preset`]: Built-in recipe presets and macros
//! - [`recipe`]: Recipe types and partial overrides
//! - [`request`]: Run request type and builder
//! - [`result`]: Run and sweep result types
//! - [`scenario`]: Scenario sets and variants
//! - [`validation`]: Request and scenario validation

pub mod error;
pub mod hash;
pub mod preset;
pub mod recipe;
pub mod request;
pub mod result;
pub mod scenario;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{ErrorCode, SpecError, ValidationError, ValidationResult};
pub use hash::{
    canonical_request_hash, canonical_request_string, canonicalize_json, derive_seed,
    request_seed,
};
pub use preset::{apply_macro, find_macro, macros, preset, Macro, PRESET_NAMES};
pub use recipe::{
    ChannelGroup, ChannelMask, EegParams, EegPatch, EmgParams, EmgPatch, MaskMode, NoiseType,
    OutputParams, OutputPatch, OutputQuality, PriorParams, PriorPatch, Recipe, RecipePatch,
    SyncParams, SyncPatch,
};
pub use request::{OperatingMode, RunKind, RunRequest, RunRequestBuilder, TimeWindow};
pub use result::{
    Alert, BandWeight, ChannelWeight, Explainability, GaitEventKind, Joint, Metrics, PoseFrame,
    PosePrediction, Provenance, RiskLevel, RunResult, ScoreBreakdown, Severity, SliceWeight,
    SweepResult, Timeline, TimelineEvent, TimelineMark, TimelineTrack, TrackId, TwinScore,
};
pub use scenario::{RunTemplate, ScenarioResult, ScenarioSet, Variant};
pub use validation::{
    is_known_channel, is_valid_identifier, validate_recipe, validate_request, validate_scenario,
};
