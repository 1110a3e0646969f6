//! Canonicalization Tests for twinstudio
//!
//! The seed is FNV-1a over the canonical request, so every source document
//! that describes the same request must canonicalize to the same string.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p twinstudio-tests --test canonicalization
//! ```

use pretty_assertions::assert_eq;
use twinstudio_cli::commands::hash::hash_request;
use twinstudio_cli::input::parse_request;
use twinstudio_spec::hash::{canonical_request_string, canonicalize_json, derive_seed};
use twinstudio_spec::{request_seed, NoiseType, RunRequest};
use twinstudio_tests::fixtures::{request, REQUEST_CALIBRATED_LAB, REQUEST_DEFAULT};

const DEFAULT_CANONICAL: &str = concat!(
    r#"{"mode":"standard","recipe":{"eeg":{"channel_mask":{"explicit":[],"groups":["motor_strip_left"],"mode":"group"},"#,
    r#""noise_sigma":1.2,"noise_type":"white"},"emg":{"delay_ms":40,"enabled":true,"gain":[1,1,1,1,1,1,1,1]},"#,
    r#""output":{"quality":"preview"},"prior":{"dynamics_smoothness":0.6,"skeleton_strength":0.7},"#,
    r#""sync":{"dropout_rate":0.05,"jitter_ms":10}},"run_kind":"preview","seed":42,"trial_id":"trial_001","#,
    r#""window":{"t0_ms":0,"t1_ms":1200}}"#
);

// ============================================================================
// Canonical Form
// ============================================================================

#[test]
fn test_default_request_canonical_form() {
    let canonical = canonical_request_string(&request(REQUEST_DEFAULT)).unwrap();
    assert_eq!(canonical, DEFAULT_CANONICAL);
    assert_eq!(
        request_seed(&request(REQUEST_DEFAULT)).unwrap(),
        derive_seed(DEFAULT_CANONICAL)
    );
}

#[test]
fn test_absent_calibration_tag_is_omitted() {
    let canonical = canonical_request_string(&request(REQUEST_DEFAULT)).unwrap();
    assert!(!canonical.contains("calibration_tag"));

    let canonical = canonical_request_string(&request(REQUEST_CALIBRATED_LAB)).unwrap();
    assert!(canonical.contains(r#""calibration_tag":"cal_2024_03""#));
}

#[test]
fn test_noise_type_alias_canonicalizes_to_pink() {
    let req = request(REQUEST_CALIBRATED_LAB);
    assert_eq!(req.recipe.eeg.noise_type, NoiseType::Pink);

    let canonical = canonical_request_string(&req).unwrap();
    assert!(canonical.contains(r#""noise_type":"pink""#));
    assert!(!canonical.contains("1f"));
}

// ============================================================================
// Source Independence
// ============================================================================

#[test]
fn test_key_order_and_whitespace_do_not_change_seed() {
    let original = request(REQUEST_CALIBRATED_LAB);

    // Re-serialize with serde's field order and no whitespace.
    let compact = serde_json::to_string(&original).unwrap();
    let reparsed = RunRequest::from_json(&compact).unwrap();

    assert_eq!(
        request_seed(&original).unwrap(),
        request_seed(&reparsed).unwrap()
    );
}

#[test]
fn test_integral_floats_match_integers() {
    let with_floats = REQUEST_DEFAULT
        .replace("\"t1_ms\": 1200", "\"t1_ms\": 1200.0")
        .replace("\"jitter_ms\": 10", "\"jitter_ms\": 10.0");
    assert_ne!(with_floats, REQUEST_DEFAULT);

    assert_eq!(
        request_seed(&RunRequest::from_json(&with_floats).unwrap()).unwrap(),
        request_seed(&request(REQUEST_DEFAULT)).unwrap()
    );
}

#[test]
fn test_source_hash_differs_but_digest_matches() {
    let pretty = parse_request(REQUEST_DEFAULT).unwrap();
    let compact_source = serde_json::to_string(&pretty.value).unwrap();
    let compact = parse_request(&compact_source).unwrap();

    assert_ne!(pretty.source_hash, compact.source_hash);

    let a = hash_request(&pretty.value).unwrap();
    let b = hash_request(&compact.value).unwrap();
    assert_eq!(a.request_digest, b.request_digest);
    assert_eq!(a.seed, b.seed);
    assert_eq!(a.canonical, DEFAULT_CANONICAL);
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_nan_reaches_canonical_form_as_null() {
    // serde_json stores non-finite floats as null.
    let value = serde_json::json!({ "x": f64::NAN });
    assert!(value["x"].is_null());
    assert_eq!(canonicalize_json(&value).unwrap(), r#"{"x":null}"#);
}

#[test]
fn test_deep_nesting_rejected() {
    let mut value = serde_json::json!(0);
    for _ in 0..200 {
        value = serde_json::json!([value]);
    }
    assert!(canonicalize_json(&value).is_err());
}
