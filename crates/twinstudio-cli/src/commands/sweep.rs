//! Sweep command implementation

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use twinstudio_engine::sweep;
use twinstudio_spec::SweepResult;

use super::json_output::to_json;
use super::report_engine_error;
use crate::input::load_request;

/// Run the sweep command
///
/// # Returns
/// Exit code: 0 on success, 1 if the request is rejected
pub fn run(request_path: &str, json_output: bool, pretty: bool) -> Result<ExitCode> {
    let loaded = load_request(request_path)?;

    let grid = match sweep(&loaded.value) {
        Ok(grid) => grid,
        Err(e) => return report_engine_error(&e, json_output),
    };

    if json_output {
        println!("{}", to_json(&grid, pretty)?);
    } else {
        print!("{}", render_grid(&grid));
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders the grid as a table with y rows and x columns.
pub fn render_grid(grid: &SweepResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6}", "y\\x"));
    for x in &grid.x {
        out.push_str(&format!("{:>7.1}", x));
    }
    out.push('\n');
    for (y, row) in grid.y.iter().zip(&grid.heat) {
        out.push_str(&format!("{:>6}", y).bold().to_string());
        for v in row {
            out.push_str(&format!("{:>7.2}", v));
        }
        out.push('\n');
    }
    out
}
