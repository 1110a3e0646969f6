//! CLI Command Tests for twinstudio
//!
//! Drives the command implementations against the fixture files on disk.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p twinstudio-tests --test cli_commands
//! ```

use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::process::ExitCode;
use twinstudio_cli::commands::template::{build_request, TemplateOptions};
use twinstudio_cli::commands::{compare, hash, presets, run, sweep, validate};
use twinstudio_cli::input::{load_request, load_scenario};
use twinstudio_spec::validation::validate_request;
use twinstudio_spec::{preset, RunKind, PRESET_NAMES};

fn fixture_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// Exit Codes
// ============================================================================

#[test]
fn test_valid_request_commands_succeed() {
    let path = fixture_path("request_default.json");
    assert_eq!(validate::run(&path, true).unwrap(), ExitCode::SUCCESS);
    assert_eq!(run::run(&path, true, false).unwrap(), ExitCode::SUCCESS);
    assert_eq!(sweep::run(&path, false, false).unwrap(), ExitCode::SUCCESS);
    assert_eq!(hash::run(&path, true).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_invalid_request_exits_one() {
    let path = fixture_path("request_invalid.json");
    assert_eq!(validate::run(&path, false).unwrap(), ExitCode::from(1));
    assert_eq!(run::run(&path, true, true).unwrap(), ExitCode::from(1));
    assert_eq!(sweep::run(&path, true, false).unwrap(), ExitCode::from(1));
}

#[test]
fn test_compare_fixture_succeeds() {
    let path = fixture_path("scenario_sync_study.json");
    assert_eq!(compare::run(&path, true, false).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_missing_file_is_an_error() {
    let path = fixture_path("does_not_exist.json");
    let err = run::run(&path, false, false).unwrap_err();
    assert!(format!("{:#}", err).contains("does_not_exist.json"));

    // JSON validation reports the failure instead of erroring.
    assert_eq!(validate::run(&path, true).unwrap(), ExitCode::from(1));
}

#[test]
fn test_load_fixtures() {
    let request = load_request(&fixture_path("request_calibrated_lab.json")).unwrap();
    assert_eq!(request.value.trial_id, "S03.walk-2");
    assert_eq!(request.source_hash.len(), 64);

    let scenario = load_scenario(&fixture_path("scenario_sync_study.json")).unwrap();
    assert_eq!(scenario.value.id, "sync_study");
}

// ============================================================================
// Templates and Presets
// ============================================================================

#[test]
fn test_every_preset_template_is_valid() {
    for name in PRESET_NAMES {
        let options = TemplateOptions {
            preset: name.to_string(),
            ..TemplateOptions::default()
        };
        let request = build_request(&options).unwrap();
        assert_eq!(Some(request.recipe.clone()), preset(name));
        let result = validate_request(&request);
        assert!(result.is_ok(), "{}: {:?}", name, result.errors);
    }
}

#[test]
fn test_every_macro_keeps_template_valid() {
    let listing = presets::list();
    for entry in &listing.macros {
        let options = TemplateOptions {
            macros: vec![entry.id.clone()],
            run_kind: RunKind::Bake,
            ..TemplateOptions::default()
        };
        let request = build_request(&options).unwrap();
        let result = validate_request(&request);
        assert!(result.is_ok(), "{}: {:?}", entry.id, result.errors);
    }
}

#[test]
fn test_hash_output_seeds() {
    let loaded = load_request(&fixture_path("request_default.json")).unwrap();
    let out = hash::hash_request(&loaded.value).unwrap();
    assert_eq!(out.seed_hex, format!("{:08x}", out.seed));
    assert_ne!(out.seed, out.sweep_seed);
    assert_eq!(out.request_digest.len(), 64);
}
