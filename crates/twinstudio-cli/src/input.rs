//! Loading requests and scenarios from files or stdin.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use twinstudio_spec::{RunRequest, ScenarioSet};

/// Path that selects stdin.
pub const STDIN_PATH: &str = "-";

/// A parsed document together with the hash of its source text.
#[derive(Debug)]
pub struct Loaded<T> {
    /// The parsed value.
    pub value: T,
    /// BLAKE3 hash of the source text (hex string).
    pub source_hash: String,
}

/// Reads the source text at `path`, or stdin when `path` is `-`.
pub fn read_source(path: &str) -> Result<String> {
    if path == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read file: {}", path))
}

/// Parses a run request from JSON text.
pub fn parse_request(source: &str) -> Result<Loaded<RunRequest>> {
    let value = RunRequest::from_json(source).context("Failed to parse run request")?;
    Ok(Loaded {
        value,
        source_hash: blake3::hash(source.as_bytes()).to_hex().to_string(),
    })
}

/// Parses a scenario set from JSON text.
pub fn parse_scenario(source: &str) -> Result<Loaded<ScenarioSet>> {
    let value = ScenarioSet::from_json(source).context("Failed to parse scenario set")?;
    Ok(Loaded {
        value,
        source_hash: blake3::hash(source.as_bytes()).to_hex().to_string(),
    })
}

/// Loads a run request from `path`.
pub fn load_request(path: &str) -> Result<Loaded<RunRequest>> {
    let source = read_source(path)?;
    parse_request(&source).with_context(|| format!("Invalid request file: {}", path))
}

/// Loads a scenario set from `path`.
pub fn load_scenario(path: &str) -> Result<Loaded<ScenarioSet>> {
    let source = read_source(path)?;
    parse_scenario(&source).with_context(|| format!("Invalid scenario file: {}", path))
}
