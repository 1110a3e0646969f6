//! CLI command implementations

pub mod compare;
pub mod hash;
pub mod json_output;
pub mod presets;
pub mod run;
pub mod sweep;
pub mod template;
pub mod validate;

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use twinstudio_engine::EngineError;
use twinstudio_spec::ValidationError;

use json_output::{error_codes, to_json, validation_errors_to_json, FailureOutput, JsonError};

/// Prints validation errors in human-readable form.
pub(crate) fn print_validation_errors(errors: &[ValidationError]) {
    for error in errors {
        let path = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code,
            path.dimmed(),
            error.message
        );
    }
}

/// Reports an engine error and returns exit code 1.
pub(crate) fn report_engine_error(err: &EngineError, json: bool) -> Result<ExitCode> {
    let validation = err.validation_errors();
    if json {
        let errors = if validation.is_empty() {
            vec![JsonError::new(error_codes::ENGINE, err.to_string())]
        } else {
            validation_errors_to_json(validation)
        };
        println!("{}", to_json(&FailureOutput::new(errors), true)?);
    } else if validation.is_empty() {
        println!("{} {}", "FAILED".red().bold(), err);
    } else {
        println!(
            "{} Request has {} error(s)",
            "FAILED".red().bold(),
            validation.len()
        );
        print_validation_errors(validation);
    }
    Ok(ExitCode::from(1))
}
