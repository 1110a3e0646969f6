//! Explainability weights.

use twinstudio_spec::{BandWeight, ChannelWeight, Explainability, SliceWeight, TimeWindow};

use crate::numeric::{round2, round_half_up};
use crate::rng::Xorshift32;

/// Channels reported in explainability output.
pub const CHANNEL_IDS: [&str; 5] = ["C3", "C4", "Pz", "F3", "F4"];

/// Frequency bands reported in explainability output.
pub const BAND_IDS: [&str; 4] = ["alpha", "beta", "gamma", "theta"];

/// Time slices reported in explainability output.
pub const SLICE_IDS: [&str; 4] = ["0-250ms", "250-500ms", "500-750ms", "750-1000ms"];

/// Draws channel, band and time-slice weights.
///
/// Channels take three draws each (weight, sub-window start, sub-window end),
/// bands one, slices two (offset, then weight).
pub fn weights(rng: &mut Xorshift32, window: &TimeWindow) -> Explainability {
    let t0 = window.t0_ms;

    let channels = CHANNEL_IDS
        .iter()
        .map(|id| {
            let weight = round2(0.55 + rng.next_unit() * 0.4);
            let start = round_half_up(t0 + rng.next_unit() * 400.0);
            let end = round_half_up(t0 + 400.0 + rng.next_unit() * 400.0);
            ChannelWeight {
                id: id.to_string(),
                weight,
                window: TimeWindow::new(start, end),
            }
        })
        .collect();

    let bands = BAND_IDS
        .iter()
        .map(|id| BandWeight {
            id: id.to_string(),
            weight: round2(0.4 + rng.next_unit() * 0.5),
        })
        .collect();

    let time_slices = SLICE_IDS
        .iter()
        .map(|id| {
            let offset = rng.next_unit() * (window.span_ms() - 300.0);
            let weight = round2(0.5 + rng.next_unit() * 0.45);
            SliceWeight {
                id: id.to_string(),
                weight,
                window: TimeWindow::new(
                    round_half_up(t0 + offset),
                    round_half_up(t0 + offset + 280.0),
                ),
            }
        })
        .collect();

    Explainability {
        channels,
        bands,
        time_slices,
    }
}
