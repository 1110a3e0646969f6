//! Run command implementation
//!
//! Synthesizes a run from a request file.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use twinstudio_engine::synthesize;
use twinstudio_spec::{RunResult, Severity};

use super::json_output::to_json;
use super::report_engine_error;
use crate::input::load_request;

/// Run the run command
///
/// # Arguments
/// * `request_path` - Path to the request JSON, or `-` for stdin
/// * `json_output` - Print the full result as JSON
/// * `pretty` - Pretty-print JSON output
///
/// # Returns
/// Exit code: 0 on success, 1 if the request is rejected
pub fn run(request_path: &str, json_output: bool, pretty: bool) -> Result<ExitCode> {
    let loaded = load_request(request_path)?;

    let result = match synthesize(&loaded.value) {
        Ok(result) => result,
        Err(e) => return report_engine_error(&e, json_output),
    };

    if json_output {
        println!("{}", to_json(&result, pretty)?);
    } else {
        print_summary(&result);
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints a human-readable run summary.
pub(crate) fn print_summary(result: &RunResult) {
    let score = &result.score;
    println!("{} {}", "Run:".cyan().bold(), result.run_id);
    println!(
        "{} {} ({} frames, {}ms)",
        "Kind:".dimmed(),
        result.run_kind,
        result.frame_count(),
        result.latency_ms
    );
    println!(
        "{} {} [{}]",
        "Twin score:".dimmed(),
        score.total,
        score.risk_level.as_str()
    );
    println!(
        "  input {}  sync {}  self-consistency {}  ood {}",
        score.breakdown.input,
        score.breakdown.sync,
        score.breakdown.self_consistency,
        score.breakdown.ood
    );
    println!(
        "{} speed {}  phase {}  cadence {}",
        "Metrics:".dimmed(),
        result.metrics.speed,
        result.metrics.phase,
        result.metrics.cadence
    );
    for alert in &result.alerts {
        let marker = match alert.severity {
            Severity::Info => "i".blue(),
            Severity::Warning => "!".yellow(),
            Severity::High => "x".red(),
        };
        println!(
            "  {} {} [{}, {}]",
            marker, alert.label, alert.window.t0_ms, alert.window.t1_ms
        );
    }
    println!("{} {}", "Run hash:".dimmed(), result.provenance.run_hash);
}
