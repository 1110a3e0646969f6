//! Scenario sets: a base recipe compared against partial-override variants.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::recipe::{Recipe, RecipePatch};
use crate::request::{OperatingMode, RunKind, RunRequest, TimeWindow};
use crate::result::RunResult;

/// A named partial override of the scenario's base recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Variant {
    pub id: String,
    pub name: String,
    /// Sections and fields to override; everything else inherits from the base.
    #[serde(default)]
    pub patch: RecipePatch,
}

impl Variant {
    /// Creates a new variant.
    pub fn new(id: impl Into<String>, name: impl Into<String>, patch: RecipePatch) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            patch,
        }
    }
}

/// A base recipe plus named variants, run over a common horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSet {
    pub id: String,
    pub name: String,
    /// Rollout horizon; each variant runs over `[0, horizon_ms]`.
    pub horizon_ms: f64,
    /// Requested sample count, carried as metadata.
    pub sample_count: u32,
    /// Seed used for every variant request.
    #[serde(default)]
    pub seed: u32,
    pub base_recipe: Recipe,
    pub variants: Vec<Variant>,
}

impl ScenarioSet {
    /// Parses a scenario set from JSON string.
    ///
    /// Variant patches that reference sections or fields outside the recipe
    /// schema fail here with [`SpecError::Merge`]; any other malformed input
    /// is a [`SpecError::JsonParse`].
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let variants = value.get("variants").and_then(|v| v.as_array());
        for (i, variant) in variants.into_iter().flatten().enumerate() {
            if let Some(patch) = variant.get("patch") {
                RecipePatch::from_value(patch.clone()).map_err(|e| match e {
                    SpecError::Merge(msg) => {
                        SpecError::Merge(format!("variants[{}].patch: {}", i, msg))
                    }
                    other => other,
                })?;
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the scenario set to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The window every variant runs over.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(0.0, self.horizon_ms)
    }

    /// The request fields shared by every variant when no template is given.
    pub fn default_template(&self) -> RunTemplate {
        RunTemplate {
            trial_id: self.id.clone(),
            mode: OperatingMode::Standard,
            seed: self.seed,
            calibration_tag: None,
        }
    }

    /// Returns the base recipe merged with each variant's patch, in variant order.
    pub fn merged_recipes(&self) -> Vec<(&str, Recipe)> {
        self.variants
            .iter()
            .map(|v| (v.id.as_str(), self.base_recipe.apply_patch(&v.patch)))
            .collect()
    }
}

/// The request fields a scenario does not determine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunTemplate {
    pub trial_id: String,
    #[serde(default)]
    pub mode: OperatingMode,
    #[serde(default)]
    pub seed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_tag: Option<String>,
}

impl RunTemplate {
    /// Builds the rollout request for one merged recipe over `window`.
    pub fn request(&self, recipe: Recipe, window: TimeWindow) -> RunRequest {
        RunRequest {
            trial_id: self.trial_id.clone(),
            mode: self.mode,
            window,
            recipe,
            seed: self.seed,
            run_kind: RunKind::Rollout,
            calibration_tag: self.calibration_tag.clone(),
        }
    }
}

/// The synthesized result of one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_id: String,
    pub variant_id: String,
    pub run: RunResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scenario_json() -> String {
        let base = serde_json::to_value(Recipe::default()).unwrap();
        serde_json::json!({
            "id": "scenario_a",
            "name": "Scenario Set",
            "horizon_ms": 1800,
            "sample_count": 48,
            "base_recipe": base,
            "variants": [
                {"id": "variant_a", "name": "Variant A", "patch": {"eeg": {"noise_sigma": 1.6}}},
                {"id": "variant_b", "name": "Variant B", "patch": {"sync": {"jitter_ms": 18}}}
            ]
        })
        .to_string()
    }

    #[test]
    fn test_parse_scenario_set() {
        let scenario = ScenarioSet::from_json(&scenario_json()).unwrap();
        assert_eq!(scenario.variants.len(), 2);
        assert_eq!(scenario.seed, 0);
        assert_eq!(scenario.window(), TimeWindow::new(0.0, 1800.0));
    }

    #[test]
    fn test_merged_recipes_follow_variant_order() {
        let scenario = ScenarioSet::from_json(&scenario_json()).unwrap();
        let merged = scenario.merged_recipes();

        assert_eq!(merged[0].0, "variant_a");
        assert_eq!(merged[0].1.eeg.noise_sigma, 1.6);
        assert_eq!(merged[0].1.sync, scenario.base_recipe.sync);

        assert_eq!(merged[1].0, "variant_b");
        assert_eq!(merged[1].1.sync.jitter_ms, 18.0);
        assert_eq!(merged[1].1.eeg, scenario.base_recipe.eeg);
    }

    #[test]
    fn test_unknown_patch_section_fails_to_parse() {
        let json = scenario_json().replace(r#"{"sync":"#, r#"{"gyro":"#);
        let err = ScenarioSet::from_json(&json).unwrap_err();
        assert!(matches!(err, SpecError::Merge(_)), "{:?}", err);
        assert!(err.to_string().contains("variants[1].patch"));
    }

    #[test]
    fn test_malformed_scenario_is_parse_error() {
        let json = scenario_json().replace(r#""horizon_ms":1800"#, r#""horizon_ms":"long""#);
        let err = ScenarioSet::from_json(&json).unwrap_err();
        assert!(matches!(err, SpecError::JsonParse(_)), "{:?}", err);

        let err = ScenarioSet::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SpecError::JsonParse(_)));
    }

    #[test]
    fn test_template_builds_rollout_request() {
        let scenario = ScenarioSet::from_json(&scenario_json()).unwrap();
        let request = scenario
            .default_template()
            .request(scenario.base_recipe.clone(), scenario.window());

        assert_eq!(request.trial_id, "scenario_a");
        assert_eq!(request.run_kind, RunKind::Rollout);
        assert_eq!(request.window.t1_ms, 1800.0);
        assert!(request.calibration_tag.is_none());
    }
}
