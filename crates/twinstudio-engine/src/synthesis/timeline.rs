//! Timeline tracks, gait events and marks.

use twinstudio_spec::{
    GaitEventKind, TimeWindow, Timeline, TimelineEvent, TimelineMark, TimelineTrack, TrackId,
};

use crate::numeric::round_ms;
use crate::rng::Xorshift32;

/// Number of gait events per run.
pub const EVENT_COUNT: usize = 4;

/// Track ids with their baseline and amplitude, in generation order.
const TRACKS: [(TrackId, f64, f64); 3] = [
    (TrackId::Qc, 80.0, 12.0),
    (TrackId::TwinScore, 75.0, 18.0),
    (TrackId::Ood, 35.0, 22.0),
];

/// Draws the three per-frame tracks, one draw per value.
pub fn tracks(rng: &mut Xorshift32, frames: usize) -> Vec<TimelineTrack> {
    TRACKS
        .iter()
        .map(|&(id, base, amplitude)| TimelineTrack {
            id,
            values: (0..frames)
                .map(|i| {
                    let wave = (i as f64 / 6.0).sin() * amplitude;
                    (base + wave + rng.centered(1.0) * amplitude).clamp(0.0, 100.0)
                })
                .collect(),
        })
        .collect()
}

/// Draws the gait events, alternating heel strike and toe off, sorted by time.
pub fn events(rng: &mut Xorshift32, window: &TimeWindow) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = (0..EVENT_COUNT)
        .map(|i| TimelineEvent {
            id: format!("evt_{}", i),
            kind: if i % 2 == 0 {
                GaitEventKind::HeelStrike
            } else {
                GaitEventKind::ToeOff
            },
            time_ms: round_ms(window.at_fraction(rng.next_unit())),
        })
        .collect();
    // Stable: equal times keep generation order.
    events.sort_by_key(|e| e.time_ms);
    events
}

/// Draws the two named marks. Only the second mark consumes a draw.
pub fn marks(rng: &mut Xorshift32, window: &TimeWindow) -> Vec<TimelineMark> {
    vec![
        TimelineMark {
            id: "mark_1".to_string(),
            label: "Intervention".to_string(),
            time_ms: round_ms(window.at_fraction(0.35)),
        },
        TimelineMark {
            id: "mark_2".to_string(),
            label: "Stride reset".to_string(),
            time_ms: round_ms(window.at_fraction(0.6 + rng.next_unit() * 0.2)),
        },
    ]
}

/// Draws the full timeline in track, event, mark order.
pub fn timeline(rng: &mut Xorshift32, frames: usize, window: &TimeWindow) -> Timeline {
    let tracks = tracks(rng, frames);
    let events = events(rng, window);
    let marks = marks(rng, window);
    Timeline {
        tracks,
        events,
        marks,
    }
}
