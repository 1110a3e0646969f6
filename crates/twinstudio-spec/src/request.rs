//! Run request types.

use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;

/// A time interval in milliseconds.
///
/// The bounds are not required to be ordered; consumers that need a length
/// use [`TimeWindow::duration_ms`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeWindow {
    pub t0_ms: f64,
    pub t1_ms: f64,
}

impl TimeWindow {
    /// Creates a new window.
    pub fn new(t0_ms: f64, t1_ms: f64) -> Self {
        Self { t0_ms, t1_ms }
    }

    /// Signed span `t1 - t0`.
    pub fn span_ms(&self) -> f64 {
        self.t1_ms - self.t0_ms
    }

    /// Absolute length of the window.
    pub fn duration_ms(&self) -> f64 {
        self.span_ms().abs()
    }

    /// Returns true if both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.t0_ms.is_finite() && self.t1_ms.is_finite()
    }

    /// Returns the point at `fraction` of the way from `t0` to `t1`.
    pub fn at_fraction(&self, fraction: f64) -> f64 {
        self.t0_ms + self.span_ms() * fraction
    }
}

/// Operating mode of the studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    #[default]
    Standard,
    Lab,
    Live,
}

impl OperatingMode {
    /// Returns the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::Standard => "standard",
            OperatingMode::Lab => "lab",
            OperatingMode::Live => "live",
        }
    }
}

impl std::str::FromStr for OperatingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(OperatingMode::Standard),
            "lab" => Ok(OperatingMode::Lab),
            "live" => Ok(OperatingMode::Live),
            _ => Err(format!("unknown operating mode: {}", s)),
        }
    }
}

/// Kind of run being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    #[default]
    Preview,
    Bake,
    Rollout,
    Sweep,
}

impl RunKind {
    /// Returns the run kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunKind::Preview => "preview",
            RunKind::Bake => "bake",
            RunKind::Rollout => "rollout",
            RunKind::Sweep => "sweep",
        }
    }
}

impl std::fmt::Display for RunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RunKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(RunKind::Preview),
            "bake" => Ok(RunKind::Bake),
            "rollout" => Ok(RunKind::Rollout),
            "sweep" => Ok(RunKind::Sweep),
            _ => Err(format!("unknown run kind: {}", s)),
        }
    }
}

/// The sole input to seed derivation and synthesis.
///
/// Two requests that canonicalize to the same string produce bit-identical
/// results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunRequest {
    /// Trial identifier; also feeds the provenance fingerprint.
    pub trial_id: String,
    pub mode: OperatingMode,
    pub window: TimeWindow,
    pub recipe: Recipe,
    /// Caller seed, echoed in provenance. Range: 0 to 2^32-1.
    pub seed: u32,
    pub run_kind: RunKind,
    /// Calibration tag; a non-empty tag raises the effective noise level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_tag: Option<String>,
}

impl RunRequest {
    /// Creates a new request builder.
    pub fn builder(trial_id: impl Into<String>) -> RunRequestBuilder {
        RunRequestBuilder::new(trial_id)
    }

    /// Parses a request from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a request from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serializes the request to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the request to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the request to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Returns true if a non-empty calibration tag is present.
    pub fn has_calibration(&self) -> bool {
        self.calibration_tag
            .as_deref()
            .is_some_and(|tag| !tag.is_empty())
    }

    /// Returns a copy of this request with a different run kind.
    pub fn with_run_kind(&self, run_kind: RunKind) -> RunRequest {
        RunRequest {
            run_kind,
            ..self.clone()
        }
    }
}

/// Builder for constructing requests programmatically.
#[derive(Debug, Clone)]
pub struct RunRequestBuilder {
    trial_id: String,
    mode: OperatingMode,
    window: TimeWindow,
    recipe: Recipe,
    seed: u32,
    run_kind: RunKind,
    calibration_tag: Option<String>,
}

impl RunRequestBuilder {
    /// Creates a new builder with studio defaults: standard mode, a
    /// 0-1200 ms window, the default recipe, seed 0 and a preview run.
    pub fn new(trial_id: impl Into<String>) -> Self {
        Self {
            trial_id: trial_id.into(),
            mode: OperatingMode::Standard,
            window: TimeWindow::new(0.0, 1200.0),
            recipe: Recipe::default(),
            seed: 0,
            run_kind: RunKind::Preview,
            calibration_tag: None,
        }
    }

    /// Sets the operating mode.
    pub fn mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the time window.
    pub fn window(mut self, t0_ms: f64, t1_ms: f64) -> Self {
        self.window = TimeWindow::new(t0_ms, t1_ms);
        self
    }

    /// Sets the recipe.
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = recipe;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the run kind.
    pub fn run_kind(mut self, run_kind: RunKind) -> Self {
        self.run_kind = run_kind;
        self
    }

    /// Sets the calibration tag.
    pub fn calibration_tag(mut self, tag: impl Into<String>) -> Self {
        self.calibration_tag = Some(tag.into());
        self
    }

    /// Builds the request.
    pub fn build(self) -> RunRequest {
        RunRequest {
            trial_id: self.trial_id,
            mode: self.mode,
            window: self.window,
            recipe: self.recipe,
            seed: self.seed,
            run_kind: self.run_kind,
            calibration_tag: self.calibration_tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = RunRequest::builder("trial_001").build();
        assert_eq!(request.trial_id, "trial_001");
        assert_eq!(request.mode, OperatingMode::Standard);
        assert_eq!(request.window, TimeWindow::new(0.0, 1200.0));
        assert_eq!(request.run_kind, RunKind::Preview);
        assert!(!request.has_calibration());
    }

    #[test]
    fn test_window_duration_ignores_order() {
        let window = TimeWindow::new(900.0, 300.0);
        assert_eq!(window.span_ms(), -600.0);
        assert_eq!(window.duration_ms(), 600.0);
        assert_eq!(window.at_fraction(0.5), 600.0);
    }

    #[test]
    fn test_empty_calibration_tag_is_absent() {
        let request = RunRequest::builder("trial_001").calibration_tag("").build();
        assert!(!request.has_calibration());

        let request = RunRequest::builder("trial_001")
            .calibration_tag("cal-2025-01")
            .build();
        assert!(request.has_calibration());
    }

    #[test]
    fn test_request_json_round_trip() {
        let request = RunRequest::builder("trial_002")
            .mode(OperatingMode::Lab)
            .window(100.0, 2500.0)
            .seed(108)
            .run_kind(RunKind::Bake)
            .calibration_tag("cal-v2")
            .build();

        let json = request.to_json_pretty().unwrap();
        let parsed = RunRequest::from_json(&json).unwrap();
        assert_eq!(request, parsed);
    }

    #[test]
    fn test_calibration_tag_omitted_when_absent() {
        let request = RunRequest::builder("trial_001").build();
        let value = request.to_value().unwrap();
        assert!(value.get("calibration_tag").is_none());
    }

    #[test]
    fn test_with_run_kind_keeps_everything_else() {
        let request = RunRequest::builder("trial_001").seed(42).build();
        let sweep = request.with_run_kind(RunKind::Sweep);
        assert_eq!(sweep.run_kind, RunKind::Sweep);
        assert_eq!(sweep.seed, 42);
        assert_eq!(sweep.recipe, request.recipe);
    }

    #[test]
    fn test_run_kind_from_str() {
        assert_eq!("rollout".parse::<RunKind>().unwrap(), RunKind::Rollout);
        assert!("replay".parse::<RunKind>().is_err());
    }
}
