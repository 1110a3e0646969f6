//! Hash command implementation
//!
//! Prints the canonical request string, the seeds derived from it and the
//! request digest.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use twinstudio_spec::hash::{blake3_hash_str, canonical_request_string, derive_seed};
use twinstudio_spec::{request_seed, RunKind, RunRequest};

use super::json_output::{to_json, HashOutput};
use crate::input::load_request;

/// Computes the hash output of a request.
pub fn hash_request(request: &RunRequest) -> Result<HashOutput> {
    let canonical = canonical_request_string(request)?;
    let seed = derive_seed(&canonical);
    let sweep_seed = request_seed(&request.with_run_kind(RunKind::Sweep))?;
    Ok(HashOutput {
        request_digest: blake3_hash_str(&canonical),
        seed_hex: format!("{:08x}", seed),
        canonical,
        seed,
        sweep_seed,
    })
}

/// Run the hash command
pub fn run(request_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = load_request(request_path)?;
    let output = hash_request(&loaded.value)?;

    if json_output {
        println!("{}", to_json(&output, true)?);
    } else {
        println!("{} {}", "Canonical:".cyan().bold(), output.canonical);
        println!("{} {} (0x{})", "Seed:".dimmed(), output.seed, output.seed_hex);
        println!("{} {}", "Sweep seed:".dimmed(), output.sweep_seed);
        println!("{} {}", "Digest:".dimmed(), output.request_digest);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_request() {
        let request = RunRequest::builder("trial_001").seed(42).build();
        let out = hash_request(&request).unwrap();

        assert_eq!(out.seed, request_seed(&request).unwrap());
        assert_eq!(out.seed_hex.len(), 8);
        assert_ne!(out.seed, out.sweep_seed);
        assert_eq!(out.request_digest, blake3_hash_str(&out.canonical));
    }
}
