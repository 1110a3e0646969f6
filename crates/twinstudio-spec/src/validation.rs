//! Request and scenario validation.
//!
//! Validation reports every problem it finds and never clamps. The engine
//! runs it before any canonicalization or generator work.

pub mod common;

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::recipe::{MaskMode, Recipe};
use crate::request::{RunRequest, TimeWindow};
use crate::scenario::ScenarioSet;

use common::{
    validate_finite, validate_positive, validate_range, validate_unit_interval,
    CommonValidationError, ViolationKind,
};

/// Regex pattern for trial and variant identifiers.
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$";

/// Regex pattern for explicit channel ids (`Ch1`..`Ch64`).
const CHANNEL_PATTERN: &str = r"^Ch([1-9]|[1-5][0-9]|6[0-4])$";

/// Domain of `recipe.eeg.noise_sigma`.
pub const NOISE_SIGMA_RANGE: (f64, f64) = (0.0, 3.0);
/// Domain of each `recipe.emg.gain` entry.
pub const GAIN_RANGE: (f64, f64) = (0.5, 2.0);
/// Domain of `recipe.emg.delay_ms`.
pub const DELAY_MS_RANGE: (f64, f64) = (0.0, 200.0);
/// Domain of `recipe.sync.jitter_ms`.
pub const JITTER_MS_RANGE: (f64, f64) = (0.0, 50.0);
/// Longest accepted window span and scenario horizon (10 minutes).
pub const MAX_WINDOW_MS: f64 = 600_000.0;

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
static CHANNEL_REGEX: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_REGEX.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("invalid regex pattern"))
}

fn channel_regex() -> &'static Regex {
    CHANNEL_REGEX.get_or_init(|| Regex::new(CHANNEL_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `id` is a valid trial or variant identifier.
///
/// # Example
/// ```
/// use twinstudio_spec::validation::is_valid_identifier;
///
/// assert!(is_valid_identifier("trial_001"));
/// assert!(!is_valid_identifier(""));
/// assert!(!is_valid_identifier("_leading"));
/// ```
pub fn is_valid_identifier(id: &str) -> bool {
    identifier_regex().is_match(id)
}

/// Returns true if `channel` names one of the 64 known channels.
pub fn is_known_channel(channel: &str) -> bool {
    channel_regex().is_match(channel)
}

/// Validates a run request.
///
/// # Example
/// ```
/// use twinstudio_spec::RunRequest;
/// use twinstudio_spec::validation::validate_request;
///
/// let request = RunRequest::builder("trial_001").seed(42).build();
/// assert!(validate_request(&request).is_ok());
///
/// let bad = RunRequest::builder("trial_001").window(0.0, f64::NAN).build();
/// assert!(!validate_request(&bad).is_ok());
/// ```
pub fn validate_request(request: &RunRequest) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !is_valid_identifier(&request.trial_id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTrialId,
            format!(
                "trial_id must match {}, got '{}'",
                IDENTIFIER_PATTERN, request.trial_id
            ),
            "trial_id",
        ));
    }

    validate_window(&request.window, "window", &mut result);
    validate_recipe_into(&request.recipe, "recipe", &mut result);

    result
}

/// Validates a recipe on its own.
pub fn validate_recipe(recipe: &Recipe) -> ValidationResult {
    let mut result = ValidationResult::default();
    validate_recipe_into(recipe, "recipe", &mut result);
    result
}

/// Validates a scenario set, including every merged variant recipe.
pub fn validate_scenario(scenario: &ScenarioSet) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !is_valid_identifier(&scenario.id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTrialId,
            format!("scenario id must match {}, got '{}'", IDENTIFIER_PATTERN, scenario.id),
            "id",
        ));
    }

    if let Err(e) = validate_positive("horizon_ms", scenario.horizon_ms) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidHorizon,
            e.message,
            "horizon_ms",
        ));
    } else {
        check(
            &mut result,
            "horizon_ms".to_string(),
            validate_range("horizon_ms", scenario.horizon_ms, 0.0, MAX_WINDOW_MS),
        );
    }

    validate_recipe_into(&scenario.base_recipe, "base_recipe", &mut result);

    let mut seen = HashSet::new();
    for (i, variant) in scenario.variants.iter().enumerate() {
        let path = format!("variants[{}]", i);
        if !is_valid_identifier(&variant.id) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidVariantId,
                format!("variant id must match {}, got '{}'", IDENTIFIER_PATTERN, variant.id),
                format!("{}.id", path),
            ));
        }
        if !seen.insert(variant.id.as_str()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateVariantId,
                format!("duplicate variant id '{}'", variant.id),
                format!("{}.id", path),
            ));
        }

        let merged = scenario.base_recipe.apply_patch(&variant.patch);
        validate_recipe_into(&merged, &format!("{}.patch", path), &mut result);
    }

    result
}

fn validate_window(window: &TimeWindow, prefix: &str, result: &mut ValidationResult) {
    check(result, format!("{}.t0_ms", prefix), validate_finite("t0_ms", window.t0_ms));
    check(result, format!("{}.t1_ms", prefix), validate_finite("t1_ms", window.t1_ms));
    if window.is_finite() {
        let span = window.duration_ms();
        if span > MAX_WINDOW_MS {
            result.add_error(ValidationError::with_path(
                ErrorCode::ValueOutOfRange,
                format!("window span must be at most {} ms, got {}", MAX_WINDOW_MS, span),
                prefix,
            ));
        }
    }
}

fn validate_recipe_into(recipe: &Recipe, prefix: &str, result: &mut ValidationResult) {
    let (lo, hi) = NOISE_SIGMA_RANGE;
    check(
        result,
        format!("{}.eeg.noise_sigma", prefix),
        validate_range("noise_sigma", recipe.eeg.noise_sigma, lo, hi),
    );

    let mask = &recipe.eeg.channel_mask;
    if mask.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyChannelMask,
            match mask.mode {
                MaskMode::Group => "channel_mask selects no groups",
                MaskMode::Explicit => "channel_mask lists no channels",
            },
            format!("{}.eeg.channel_mask", prefix),
        ));
    }
    for (i, channel) in mask.explicit.iter().enumerate() {
        if !is_known_channel(channel) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnknownChannel,
                format!("unknown channel '{}' (expected Ch1..Ch64)", channel),
                format!("{}.eeg.channel_mask.explicit[{}]", prefix, i),
            ));
        }
    }

    if recipe.emg.enabled && recipe.emg.gain.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyGainVector,
            "emg is enabled but gain is empty",
            format!("{}.emg.gain", prefix),
        ));
    }
    let (lo, hi) = GAIN_RANGE;
    for (i, gain) in recipe.emg.gain.iter().enumerate() {
        check(
            result,
            format!("{}.emg.gain[{}]", prefix, i),
            validate_range("gain", *gain, lo, hi),
        );
    }
    let (lo, hi) = DELAY_MS_RANGE;
    check(
        result,
        format!("{}.emg.delay_ms", prefix),
        validate_range("delay_ms", recipe.emg.delay_ms, lo, hi),
    );

    let (lo, hi) = JITTER_MS_RANGE;
    check(
        result,
        format!("{}.sync.jitter_ms", prefix),
        validate_range("jitter_ms", recipe.sync.jitter_ms, lo, hi),
    );
    check(
        result,
        format!("{}.sync.dropout_rate", prefix),
        validate_unit_interval("dropout_rate", recipe.sync.dropout_rate),
    );

    check(
        result,
        format!("{}.prior.skeleton_strength", prefix),
        validate_unit_interval("skeleton_strength", recipe.prior.skeleton_strength),
    );
    check(
        result,
        format!("{}.prior.dynamics_smoothness", prefix),
        validate_unit_interval("dynamics_smoothness", recipe.prior.dynamics_smoothness),
    );
}

/// Records a common validation failure under `path`.
fn check(result: &mut ValidationResult, path: String, outcome: Result<(), CommonValidationError>) {
    if let Err(e) = outcome {
        let code = match e.kind {
            ViolationKind::NonFinite => ErrorCode::NonFiniteValue,
            ViolationKind::OutOfRange => ErrorCode::ValueOutOfRange,
        };
        result.add_error(ValidationError::with_path(code, e.message, path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{ChannelMask, RecipePatch};
    use crate::scenario::Variant;

    fn codes(result: &ValidationResult) -> Vec<ErrorCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_default_request_is_valid() {
        let request = RunRequest::builder("trial_001").build();
        let result = validate_request(&request);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
    }

    #[test]
    fn test_identifiers() {
        assert!(is_valid_identifier("trial_001"));
        assert!(is_valid_identifier("S01.session-2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("has space"));
        assert!(!is_valid_identifier(&"a".repeat(65)));
    }

    #[test]
    fn test_known_channels() {
        assert!(is_known_channel("Ch1"));
        assert!(is_known_channel("Ch64"));
        assert!(!is_known_channel("Ch0"));
        assert!(!is_known_channel("Ch65"));
        assert!(!is_known_channel("C3"));
    }

    #[test]
    fn test_non_finite_window_rejected() {
        let request = RunRequest::builder("trial_001")
            .window(f64::NEG_INFINITY, 1200.0)
            .build();
        let result = validate_request(&request);
        assert_eq!(codes(&result), vec![ErrorCode::NonFiniteValue]);
        assert_eq!(result.errors[0].path.as_deref(), Some("window.t0_ms"));
    }

    #[test]
    fn test_negative_sigma_rejected_not_clamped() {
        let mut recipe = Recipe::default();
        recipe.eeg.noise_sigma = -0.5;
        let request = RunRequest::builder("trial_001").recipe(recipe).build();

        let result = validate_request(&request);
        assert_eq!(codes(&result), vec![ErrorCode::ValueOutOfRange]);
        assert_eq!(request.recipe.eeg.noise_sigma, -0.5);
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut recipe = Recipe::default();
        recipe.sync.jitter_ms = f64::NAN;
        recipe.sync.dropout_rate = 1.5;
        recipe.emg.gain = vec![1.0, 4.0];
        recipe.eeg.channel_mask = ChannelMask::explicit(["Ch1", "Ch99"]);
        let request = RunRequest::builder("").recipe(recipe).build();

        let result = validate_request(&request);
        let found = codes(&result);
        assert!(found.contains(&ErrorCode::InvalidTrialId));
        assert!(found.contains(&ErrorCode::NonFiniteValue));
        assert!(found.contains(&ErrorCode::ValueOutOfRange));
        assert!(found.contains(&ErrorCode::UnknownChannel));
        assert_eq!(result.errors.len(), 5);
    }

    #[test]
    fn test_empty_mask_and_gain_rejected() {
        let mut recipe = Recipe::default();
        recipe.eeg.channel_mask = ChannelMask::groups([]);
        recipe.emg.gain.clear();

        let result = validate_recipe(&recipe);
        assert_eq!(
            codes(&result),
            vec![ErrorCode::EmptyChannelMask, ErrorCode::EmptyGainVector]
        );
    }

    #[test]
    fn test_disabled_emg_may_have_no_gain() {
        let mut recipe = Recipe::default();
        recipe.emg.enabled = false;
        recipe.emg.gain.clear();
        assert!(validate_recipe(&recipe).is_ok());
    }

    fn scenario(variants: Vec<Variant>) -> ScenarioSet {
        ScenarioSet {
            id: "scenario_1".to_string(),
            name: "Scenario".to_string(),
            horizon_ms: 1800.0,
            sample_count: 48,
            seed: 0,
            base_recipe: Recipe::default(),
            variants,
        }
    }

    #[test]
    fn test_scenario_duplicate_variant_ids() {
        let s = scenario(vec![
            Variant::new("variant_a", "A", RecipePatch::default()),
            Variant::new("variant_a", "A again", RecipePatch::default()),
        ]);
        let result = validate_scenario(&s);
        assert_eq!(codes(&result), vec![ErrorCode::DuplicateVariantId]);
    }

    #[test]
    fn test_scenario_validates_merged_recipe() {
        let patch = RecipePatch::from_json(r#"{"sync": {"jitter_ms": 80}}"#).unwrap();
        let s = scenario(vec![Variant::new("variant_a", "A", patch)]);
        let result = validate_scenario(&s);
        assert_eq!(codes(&result), vec![ErrorCode::ValueOutOfRange]);
        assert_eq!(
            result.errors[0].path.as_deref(),
            Some("variants[0].patch.sync.jitter_ms")
        );
    }

    #[test]
    fn test_scenario_horizon_must_be_positive() {
        let mut s = scenario(vec![]);
        s.horizon_ms = 0.0;
        assert_eq!(codes(&validate_scenario(&s)), vec![ErrorCode::InvalidHorizon]);
    }

    #[test]
    fn test_window_span_is_bounded() {
        let request = RunRequest::builder("trial_001").window(0.0, 1e300).build();
        let result = validate_request(&request);
        assert_eq!(codes(&result), vec![ErrorCode::ValueOutOfRange]);
        assert_eq!(result.errors[0].path.as_deref(), Some("window"));

        // Finite bounds whose difference overflows.
        let request = RunRequest::builder("trial_001")
            .window(-1e308, 1e308)
            .build();
        assert_eq!(codes(&validate_request(&request)), vec![ErrorCode::ValueOutOfRange]);

        let request = RunRequest::builder("trial_001")
            .window(MAX_WINDOW_MS, 0.0)
            .build();
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_scenario_horizon_is_bounded() {
        let mut s = scenario(vec![]);
        s.horizon_ms = 1e12;
        let result = validate_scenario(&s);
        assert_eq!(codes(&result), vec![ErrorCode::ValueOutOfRange]);
        assert_eq!(result.errors[0].path.as_deref(), Some("horizon_ms"));
    }
}
