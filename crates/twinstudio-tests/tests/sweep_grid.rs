//! Sweep Grid Tests for twinstudio
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p twinstudio-tests --test sweep_grid
//! ```

use pretty_assertions::assert_eq;
use twinstudio_cli::commands::sweep::render_grid;
use twinstudio_engine::sweep::{X_LEN, Y_LEN};
use twinstudio_engine::{sweep, Xorshift32};
use twinstudio_spec::{request_seed, RunKind, RunRequest};
use twinstudio_tests::fixtures::{request, REQUEST_CALIBRATED_LAB, REQUEST_DEFAULT};

#[test]
fn test_axes_are_fixed() {
    let grid = sweep(&request(REQUEST_DEFAULT)).unwrap();
    assert_eq!(grid.x.len(), X_LEN);
    assert_eq!(grid.x[0], 0.6);
    assert!((grid.x[6] - 3.0).abs() < 1e-9);
    assert_eq!(grid.y, vec![18.0, 24.0, 30.0, 36.0, 42.0, 48.0]);
}

#[test]
fn test_heat_is_row_major_and_bounded() {
    let grid = sweep(&request(REQUEST_CALIBRATED_LAB)).unwrap();
    assert_eq!(grid.heat.len(), Y_LEN);
    for row in &grid.heat {
        assert_eq!(row.len(), X_LEN);
        for v in row {
            assert!((0.6..=0.95).contains(v), "cell {} out of range", v);
        }
    }
}

#[test]
fn test_heat_replays_from_sweep_seed() {
    let req = request(REQUEST_DEFAULT);
    let grid = sweep(&req).unwrap();

    let seed = request_seed(&req.with_run_kind(RunKind::Sweep)).unwrap();
    let mut rng = Xorshift32::new(seed);
    for yi in 0..Y_LEN {
        for xi in 0..X_LEN {
            let expected = ((0.6 + rng.next_unit() * 0.35) * 100.0 + 0.5).floor() / 100.0;
            assert_eq!(grid.cell(xi, yi), Some(expected));
        }
    }
}

#[test]
fn test_sweep_ignores_incoming_run_kind() {
    let req = request(REQUEST_DEFAULT);
    let preview = sweep(&req).unwrap();
    let bake = sweep(&req.with_run_kind(RunKind::Bake)).unwrap();
    assert_eq!(preview, bake);
}

#[test]
fn test_seed_changing_field_changes_grid() {
    let a = RunRequest::builder("trial_001").seed(42).build();
    let b = RunRequest::builder("trial_002").seed(42).build();
    assert_ne!(request_seed(&a).unwrap(), request_seed(&b).unwrap());

    let grid_a = sweep(&a).unwrap();
    let grid_b = sweep(&b).unwrap();
    assert_ne!(grid_a.heat, grid_b.heat);
    assert_eq!(grid_a.x, grid_b.x);
    assert_eq!(grid_a.y, grid_b.y);

    // Identical requests still agree.
    assert_eq!(grid_a, sweep(&a).unwrap());
}

#[test]
fn test_sweep_seed_differs_from_run_seed() {
    for kind in [RunKind::Preview, RunKind::Bake, RunKind::Rollout] {
        let req = request(REQUEST_DEFAULT).with_run_kind(kind);
        let run_seed = request_seed(&req).unwrap();
        let sweep_seed = request_seed(&req.with_run_kind(RunKind::Sweep)).unwrap();
        assert_ne!(run_seed, sweep_seed, "{:?}", kind);
    }
}

#[test]
fn test_render_grid_has_row_per_y() {
    let grid = sweep(&request(REQUEST_DEFAULT)).unwrap();
    let rendered = render_grid(&grid);
    assert!(rendered.lines().count() >= Y_LEN);
    assert!(rendered.contains("18"));
}
