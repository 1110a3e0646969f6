//! Validate command implementation
//!
//! Validates a request file and prints every error found.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use twinstudio_spec::canonical_request_hash;
use twinstudio_spec::validation::validate_request;

use super::json_output::{
    error_codes, to_json, validation_errors_to_json, JsonError, ValidateOutput,
};
use super::print_validation_errors;
use crate::input::{load_request, parse_request, read_source};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(request_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(request_path)
    } else {
        run_human(request_path)
    }
}

fn run_human(request_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), request_path);

    let loaded = load_request(request_path)?;
    println!("{} {}", "Source:".dimmed(), &loaded.source_hash[..16]);

    let result = validate_request(&loaded.value);
    if result.is_ok() {
        let digest = canonical_request_hash(&loaded.value)?;
        println!("{} {}", "Digest:".dimmed(), digest);
        println!("\n{} Request is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        print_validation_errors(&result.errors);
        println!(
            "\n{} Request has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(request_path: &str) -> Result<ExitCode> {
    let parsed = read_source(request_path).and_then(|source| parse_request(&source));
    let loaded = match parsed {
        Ok(loaded) => loaded,
        Err(e) => {
            let output = ValidateOutput {
                success: false,
                errors: vec![JsonError::new(error_codes::INPUT, format!("{:#}", e))],
                trial_id: None,
                request_digest: None,
                source_hash: None,
            };
            println!("{}", to_json(&output, true)?);
            return Ok(ExitCode::from(1));
        }
    };

    let result = validate_request(&loaded.value);
    let request_digest = if result.is_ok() {
        Some(canonical_request_hash(&loaded.value)?)
    } else {
        None
    };
    let output = ValidateOutput {
        success: result.is_ok(),
        errors: validation_errors_to_json(&result.errors),
        trial_id: Some(loaded.value.trial_id.clone()),
        request_digest,
        source_hash: Some(loaded.source_hash),
    };
    println!("{}", to_json(&output, true)?);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
