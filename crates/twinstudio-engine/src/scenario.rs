//! Scenario variant comparison.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use twinstudio_spec::validation::validate_scenario;
use twinstudio_spec::{RunTemplate, ScenarioResult, ScenarioSet};

use crate::error::{EngineError, EngineResult};
use crate::synthesis::synthesize_at;

/// Runs every variant of a scenario with the scenario's default template.
///
/// Each variant's recipe is the base recipe with the variant patch merged
/// section-wise. Results come back in variant order, each tagged with its
/// variant id as provenance `recipe_id`.
pub fn compare_variants(scenario: &ScenarioSet) -> EngineResult<Vec<ScenarioResult>> {
    compare_variants_with(scenario, &scenario.default_template())
}

/// Runs every variant of a scenario using `template` for trial, mode, seed
/// and calibration.
pub fn compare_variants_with(
    scenario: &ScenarioSet,
    template: &RunTemplate,
) -> EngineResult<Vec<ScenarioResult>> {
    compare_variants_at(scenario, template, Utc::now())
}

/// Like [`compare_variants_with`], stamping every run with `created_at`.
pub fn compare_variants_at(
    scenario: &ScenarioSet,
    template: &RunTemplate,
    created_at: DateTime<Utc>,
) -> EngineResult<Vec<ScenarioResult>> {
    validate_scenario(scenario).into_result()?;

    let window = scenario.window();
    let results = scenario
        .merged_recipes()
        .into_iter()
        .map(|(variant_id, recipe)| -> EngineResult<ScenarioResult> {
            let request = template.request(recipe, window);
            let mut run =
                synthesize_at(&request, created_at).map_err(|e| EngineError::variant(variant_id, e))?;
            run.provenance.recipe_id = variant_id.to_string();
            debug!(
                scenario_id = %scenario.id,
                variant_id,
                run_id = %run.run_id,
                "synthesized variant"
            );
            Ok(ScenarioResult {
                scenario_id: scenario.id.clone(),
                variant_id: variant_id.to_string(),
                run,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    info!(scenario_id = %scenario.id, variants = results.len(), "compared variants");
    Ok(results)
}
