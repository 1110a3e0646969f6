//! Run synthesis.
//!
//! A run is a pure function of its request apart from `created_at`. The
//! request is validated, canonicalized and hashed to a seed; a single
//! [`Xorshift32`] cursor then flows through the steps below in a fixed
//! order. Reordering steps changes every downstream value.
//!
//! | step | draws |
//! |---|---|
//! | score | 1 + 4 + 12 |
//! | pose | per frame: 1 + 53 × 3 |
//! | tracks | 3 × frames |
//! | events | 4 |
//! | marks | 1 |
//! | explainability | 5 × 3 + 4 + 4 × 2 |
//! | latency | 1 |
//! | metrics | 3 |
//!
//! Alerts and provenance consume no draws.

pub mod alerts;
pub mod explain;
pub mod pose;
pub mod score;
pub mod timeline;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use twinstudio_spec::hash::{blake3_hash_str, canonical_request_string, derive_seed};
use twinstudio_spec::validation::{validate_request, MAX_WINDOW_MS};
use twinstudio_spec::{
    ErrorCode, Metrics, Provenance, RunRequest, RunResult, SpecError, TimeWindow, ValidationError,
};

use crate::error::EngineResult;
use crate::numeric::{round2, round_half_up};
use crate::rng::Xorshift32;

/// Sampling interval of synthesized frames.
pub const FRAME_INTERVAL_MS: f64 = 40.0;

/// Minimum number of frames, applied to short and degenerate windows.
pub const MIN_FRAMES: usize = 48;

/// Noise added to `noise_sigma` when a calibration tag is present.
pub const CALIBRATION_NOISE_OFFSET: f64 = 0.1;

/// Model version tag echoed in provenance.
pub const MODEL_VERSION: &str = "nk-2.4.0";

/// Data version tag echoed in provenance.
pub const DATA_VERSION: &str = "eeg-v6";

/// Feature snapshot version echoed in provenance.
pub const FEATURE_SNAPSHOT_VERSION: &str = "fsnap_0.4.0";

/// Number of frames synthesized for `window`.
///
/// Returns `None` when the span is non-finite or longer than
/// [`MAX_WINDOW_MS`].
///
/// # Example
/// ```
/// use twinstudio_engine::synthesis::frame_count;
/// use twinstudio_spec::TimeWindow;
///
/// assert_eq!(frame_count(&TimeWindow::new(0.0, 4000.0)), Some(100));
/// assert_eq!(frame_count(&TimeWindow::new(0.0, 1200.0)), Some(48));
/// assert_eq!(frame_count(&TimeWindow::new(500.0, 500.0)), Some(48));
/// assert_eq!(frame_count(&TimeWindow::new(0.0, 1e300)), None);
/// ```
pub fn frame_count(window: &TimeWindow) -> Option<usize> {
    let duration = window.duration_ms();
    if !duration.is_finite() || duration > MAX_WINDOW_MS {
        return None;
    }
    // Bounded by MAX_WINDOW_MS / FRAME_INTERVAL_MS, so the cast is exact.
    let frames = round_half_up(duration / FRAME_INTERVAL_MS) as usize;
    Some(frames.max(MIN_FRAMES))
}

/// Noise level driving the score, pose and alerts.
pub fn effective_noise(request: &RunRequest) -> f64 {
    let sigma = request.recipe.eeg.noise_sigma;
    if request.has_calibration() {
        sigma + CALIBRATION_NOISE_OFFSET
    } else {
        sigma
    }
}

/// Synthesizes a run, stamped with the current time.
pub fn synthesize(request: &RunRequest) -> EngineResult<RunResult> {
    synthesize_at(request, Utc::now())
}

/// Synthesizes a run with an explicit creation time.
///
/// Two calls with equal requests and equal `created_at` return equal results.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use twinstudio_engine::synthesize_at;
/// use twinstudio_spec::RunRequest;
///
/// let request = RunRequest::builder("trial_001").seed(42).build();
/// let at = Utc.timestamp_opt(0, 0).unwrap();
///
/// let a = synthesize_at(&request, at).unwrap();
/// let b = synthesize_at(&request, at).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.alerts.len(), 3);
/// ```
pub fn synthesize_at(request: &RunRequest, created_at: DateTime<Utc>) -> EngineResult<RunResult> {
    if let Err(e) = validate_request(request).into_result() {
        warn!(
            trial_id = %request.trial_id,
            errors = e.validation_errors().len(),
            "rejected run request"
        );
        return Err(e.into());
    }

    let canonical = canonical_request_string(request)?;
    let seed = derive_seed(&canonical);
    let request_digest = blake3_hash_str(&canonical);
    let mut rng = Xorshift32::new(seed);

    let window = request.window;
    let frames = frame_count(&window).ok_or_else(|| {
        SpecError::ValidationFailed(vec![ValidationError::with_path(
            ErrorCode::ValueOutOfRange,
            format!("window span must be at most {} ms", MAX_WINDOW_MS),
            "window",
        )])
    })?;
    let noise = effective_noise(request);
    let jitter_ms = request.recipe.sync.jitter_ms;
    debug!(
        trial_id = %request.trial_id,
        seed = %format!("{:08x}", seed),
        frames,
        noise,
        "derived synthesis parameters"
    );

    let score = score::twin_score(&mut rng, noise, jitter_ms);
    let prediction = pose::predict(&mut rng, frames, noise);
    let timeline = timeline::timeline(&mut rng, frames, &window);
    let explain = explain::weights(&mut rng, &window);
    let alerts = alerts::alerts(score.risk_level, noise, jitter_ms, &window);
    let latency_ms = round_half_up(320.0 + rng.next_unit() * 480.0) as u32;
    let metrics = Metrics {
        speed: round2(1.4 + rng.next_unit() * 1.1),
        phase: round2(0.2 + rng.next_unit() * 0.8),
        cadence: round_half_up(86.0 + rng.next_unit() * 28.0),
    };

    let provenance = Provenance {
        model_version: MODEL_VERSION.to_string(),
        data_version: DATA_VERSION.to_string(),
        recipe_id: request.recipe.output.quality.as_str().to_string(),
        seed: request.seed,
        raw_fingerprint: format!("raw_{}", request.trial_id),
        feature_snapshot_version: FEATURE_SNAPSHOT_VERSION.to_string(),
        run_hash: format!("hash_{:x}", seed),
        request_digest,
    };

    let result = RunResult {
        run_id: run_id(seed),
        created_at,
        latency_ms,
        run_kind: request.run_kind,
        window,
        prediction,
        provenance,
        metrics,
        score,
        explain,
        alerts,
        timeline,
    };

    info!(
        run_id = %result.run_id,
        run_kind = %result.run_kind,
        total = result.score.total,
        risk = result.score.risk_level.as_str(),
        "synthesized run"
    );

    Ok(result)
}

/// Run id: `run_` plus the first six hex digits of the seed.
pub fn run_id(seed: u32) -> String {
    let hex = format!("{:x}", seed);
    format!("run_{}", &hex[..hex.len().min(6)])
}
