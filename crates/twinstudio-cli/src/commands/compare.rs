//! Compare command implementation
//!
//! Runs every variant of a scenario set.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use twinstudio_engine::compare_variants;

use super::json_output::to_json;
use super::report_engine_error;
use crate::input::load_scenario;

/// Run the compare command
///
/// # Returns
/// Exit code: 0 on success, 1 if the scenario is rejected
pub fn run(scenario_path: &str, json_output: bool, pretty: bool) -> Result<ExitCode> {
    let loaded = load_scenario(scenario_path)?;
    let scenario = &loaded.value;

    let results = match compare_variants(scenario) {
        Ok(results) => results,
        Err(e) => return report_engine_error(&e, json_output),
    };

    if json_output {
        println!("{}", to_json(&results, pretty)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} ({} variants, horizon {}ms)",
        "Scenario:".cyan().bold(),
        scenario.name,
        results.len(),
        scenario.horizon_ms
    );
    for r in &results {
        let score = &r.run.score;
        println!(
            "  {:<16} total {:>5}  ood {:>5}  [{}]  {}",
            r.variant_id.bold(),
            score.total,
            score.breakdown.ood,
            score.risk_level.as_str(),
            r.run.run_id.dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}
