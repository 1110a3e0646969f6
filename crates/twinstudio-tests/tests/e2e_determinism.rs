//! End-to-End Determinism Tests for twinstudio
//!
//! Tests verify:
//! - Same request -> byte-identical run, sweep and comparison output
//! - Request fields that must change the seed do change it
//! - Results only depend on the wall clock through `created_at`
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p twinstudio-tests --test e2e_determinism
//! ```

use pretty_assertions::assert_eq;
use twinstudio_engine::{synthesize, synthesize_at};
use twinstudio_spec::{request_seed, RunKind, TrackId};
use twinstudio_tests::determinism::{
    compare_bytes, fixed_timestamp, run_bytes, sweep_bytes, verify_determinism,
    DeterminismFixture, Operation,
};
use twinstudio_tests::fixtures::{
    request, scenario, REQUEST_CALIBRATED_LAB, REQUEST_DEFAULT, SCENARIO_SYNC_STUDY,
    VALID_REQUESTS,
};
use twinstudio_tests::test_determinism;

// ============================================================================
// Byte-Level Determinism
// ============================================================================

test_determinism!(default_run_is_byte_identical, {
    run_bytes(&request(REQUEST_DEFAULT)).unwrap()
});

test_determinism!(calibrated_sweep_is_byte_identical, runs = 5, {
    sweep_bytes(&request(REQUEST_CALIBRATED_LAB)).unwrap()
});

test_determinism!(scenario_comparison_is_byte_identical, {
    compare_bytes(&scenario(SCENARIO_SYNC_STUDY)).unwrap()
});

#[test]
fn test_all_fixtures_deterministic() {
    for operation in [Operation::Run, Operation::Sweep] {
        let mut fixture = DeterminismFixture::new().operation(operation).runs(3);
        for (name, json) in VALID_REQUESTS {
            fixture = fixture.add_request(*name, *json);
        }
        let report = fixture.run();
        report.assert_all_deterministic();
        assert_eq!(report.passed_count(), VALID_REQUESTS.len());
    }
}

#[test]
fn test_only_created_at_depends_on_the_clock() {
    let req = request(REQUEST_DEFAULT);
    let live = synthesize(&req).unwrap();
    let pinned = synthesize_at(&req, fixed_timestamp()).unwrap();

    assert_eq!(
        live.deterministic_digest().unwrap(),
        pinned.deterministic_digest().unwrap()
    );
    assert_eq!(live.latency_ms, pinned.latency_ms);
}

// ============================================================================
// Seed Sensitivity
// ============================================================================

#[test]
fn test_seed_changes_with_caller_seed() {
    let base = request(REQUEST_DEFAULT);
    let mut other = base.clone();
    other.seed += 1;
    assert_ne!(request_seed(&base).unwrap(), request_seed(&other).unwrap());

    let a = synthesize_at(&base, fixed_timestamp()).unwrap();
    let b = synthesize_at(&other, fixed_timestamp()).unwrap();
    assert_ne!(a.provenance.run_hash, b.provenance.run_hash);
    assert_ne!(a.prediction.twin_pose, b.prediction.twin_pose);
}

#[test]
fn test_seed_changes_with_run_kind() {
    let base = request(REQUEST_DEFAULT);
    let bake = base.with_run_kind(RunKind::Bake);
    assert_ne!(request_seed(&base).unwrap(), request_seed(&bake).unwrap());
}

#[test]
fn test_seed_changes_with_calibration_tag() {
    let base = request(REQUEST_DEFAULT);
    let mut tagged = base.clone();
    tagged.calibration_tag = Some("cal_v2".to_string());
    assert_ne!(request_seed(&base).unwrap(), request_seed(&tagged).unwrap());
}

// ============================================================================
// Result Shape
// ============================================================================

#[test]
fn test_calibrated_lab_run_shape() {
    let req = request(REQUEST_CALIBRATED_LAB);
    let run = synthesize_at(&req, fixed_timestamp()).unwrap();

    // 4000 ms window at 40 ms per frame.
    assert_eq!(run.frame_count(), 100);
    assert_eq!(run.prediction.reference_pose.len(), 100);
    assert_eq!(run.prediction.confidence_radius.len(), 100);
    for frame in run.prediction.twin_pose.iter() {
        assert_eq!(frame.len(), 53);
    }

    for id in [TrackId::Qc, TrackId::TwinScore, TrackId::Ood] {
        assert_eq!(run.timeline.track(id).unwrap().values.len(), 100);
    }
    assert_eq!(run.run_kind, RunKind::Bake);
    assert_eq!(run.provenance.recipe_id, "bake");
    assert_eq!(run.provenance.seed, 1337);
    assert_eq!(run.provenance.raw_fingerprint, "raw_S03.walk-2");
    assert_eq!(run.created_at, fixed_timestamp());

    // Calibration lifts sigma 2.4 past the bad-channel threshold; jitter 18 drifts.
    assert_eq!(run.alerts[1].label, "bad_channel_ratio > 0.18");
    assert_eq!(run.alerts[2].label, "monotonicity drift");
}

#[test]
fn test_events_sorted_and_inside_window() {
    for (name, json) in VALID_REQUESTS {
        let req = request(json);
        let run = synthesize_at(&req, fixed_timestamp()).unwrap();
        let times: Vec<i64> = run.timeline.events.iter().map(|e| e.time_ms).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted, "{}", name);
        for t in times {
            assert!(
                (req.window.t0_ms as i64..=req.window.t1_ms as i64).contains(&t),
                "{}: event at {} outside window",
                name,
                t
            );
        }
    }
}

#[test]
fn test_verify_determinism_over_result_json() {
    let req = request(REQUEST_DEFAULT);
    let result = verify_determinism(
        || {
            synthesize_at(&req, fixed_timestamp())
                .unwrap()
                .to_json()
                .unwrap()
        },
        4,
    );
    assert!(result.is_deterministic);
    assert!(result.output_size > 0);
}
