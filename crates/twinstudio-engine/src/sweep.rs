//! Parameter sweep grid.
//!
//! Cells are independent draws in `[0.6, 0.95]`; they carry no relation to
//! the axis values they are indexed by.

use tracing::debug;
use twinstudio_spec::hash::request_seed;
use twinstudio_spec::validation::validate_request;
use twinstudio_spec::{RunKind, RunRequest, SweepResult};

use crate::error::EngineResult;
use crate::numeric::round2;
use crate::rng::Xorshift32;

/// Number of x-axis values.
pub const X_LEN: usize = 7;

/// Number of y-axis values.
pub const Y_LEN: usize = 6;

/// Sweeps the request's parameter grid.
///
/// The run kind is forced to [`RunKind::Sweep`] before seeding, so a sweep
/// never shares a seed with a regular run of the same request.
pub fn sweep(request: &RunRequest) -> EngineResult<SweepResult> {
    validate_request(request).into_result()?;

    let sweep_request = request.with_run_kind(RunKind::Sweep);
    let seed = request_seed(&sweep_request)?;
    let mut rng = Xorshift32::new(seed);

    let x: Vec<f64> = (0..X_LEN).map(|i| i as f64 * 0.4 + 0.6).collect();
    let y: Vec<f64> = (0..Y_LEN).map(|i| i as f64 * 6.0 + 18.0).collect();
    let heat = y
        .iter()
        .map(|_| {
            x.iter()
                .map(|_| round2(0.6 + rng.next_unit() * 0.35))
                .collect()
        })
        .collect();

    debug!(trial_id = %request.trial_id, seed = %format!("{:08x}", seed), "swept grid");

    Ok(SweepResult { x, y, heat })
}
