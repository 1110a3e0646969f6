//! Composite twin score.

use twinstudio_spec::{RiskLevel, ScoreBreakdown, TwinScore};

use crate::numeric::round1;
use crate::rng::Xorshift32;

/// Number of trend samples.
pub const TREND_LEN: usize = 12;

/// Bounds of the score baseline.
pub const BASELINE_RANGE: (f64, f64) = (50.0, 96.0);

/// Bounds of each breakdown component.
pub const BREAKDOWN_RANGE: (f64, f64) = (40.0, 98.0);

/// Bounds of each trend sample.
pub const TREND_RANGE: (f64, f64) = (40.0, 99.0);

/// Score baseline before perturbation.
pub fn baseline(noise: f64, jitter_ms: f64) -> f64 {
    let (lo, hi) = BASELINE_RANGE;
    (90.0 - noise * 8.0 - jitter_ms * 0.6).clamp(lo, hi)
}

/// Draws the composite score.
///
/// Consumes 17 draws: total, four breakdown components, then the trend.
pub fn twin_score(rng: &mut Xorshift32, noise: f64, jitter_ms: f64) -> TwinScore {
    let base = baseline(noise, jitter_ms);
    let total = round1(base + rng.centered(8.0));

    let (lo, hi) = BREAKDOWN_RANGE;
    let input = round1(base + rng.centered(10.0)).clamp(lo, hi);
    let sync = round1(base + rng.centered(9.0)).clamp(lo, hi);
    let self_consistency = round1(base + rng.centered(9.0)).clamp(lo, hi);
    let ood = round1(base - noise * 4.0 + rng.centered(10.0)).clamp(lo, hi);

    let (lo, hi) = TREND_RANGE;
    let trend = (0..TREND_LEN)
        .map(|_| round1(total + rng.centered(12.0)).clamp(lo, hi))
        .collect();

    TwinScore {
        total,
        breakdown: ScoreBreakdown {
            input,
            sync,
            self_consistency,
            ood,
        },
        risk_level: RiskLevel::from_total(total),
        trend,
    }
}
