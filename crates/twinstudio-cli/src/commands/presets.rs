//! Presets command implementation

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use twinstudio_spec::{macros, preset, PRESET_NAMES};

use super::json_output::{to_json, MacroEntry, PresetsOutput};

/// Lists the built-in presets and macros.
pub fn list() -> PresetsOutput {
    PresetsOutput {
        presets: PRESET_NAMES.iter().map(|s| s.to_string()).collect(),
        macros: macros()
            .into_iter()
            .map(|m| MacroEntry {
                id: m.id.to_string(),
                name: m.name.to_string(),
                description: m.description.to_string(),
            })
            .collect(),
    }
}

/// Run the presets command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let output = list();
    if json_output {
        println!("{}", to_json(&output, true)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Presets:".cyan().bold());
    for name in &output.presets {
        if let Some(recipe) = preset(name) {
            println!(
                "  {:<12} sigma {}  jitter {}ms  {}",
                name.bold(),
                recipe.eeg.noise_sigma,
                recipe.sync.jitter_ms,
                recipe.output.quality.as_str().dimmed()
            );
        }
    }
    println!("{}", "Macros:".cyan().bold());
    for m in &output.macros {
        println!("  {:<16} {}", m.id.bold(), m.description);
    }
    Ok(ExitCode::SUCCESS)
}
