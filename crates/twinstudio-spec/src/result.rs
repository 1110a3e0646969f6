//! Run result types produced by the synthesis engine.
//!
//! A [`RunResult`] is an immutable snapshot. Every field except `created_at`
//! is a pure function of the request that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::hash::canonical_value_hash;
use crate::request::{RunKind, TimeWindow};

/// A joint position `[x, y, z]`.
pub type Joint = [f64; 3];

/// One frame of joint positions.
pub type PoseFrame = Vec<Joint>;

/// Reference and twin pose sequences plus per-frame confidence radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosePrediction {
    /// Synthetic ground-truth pose, one entry per frame.
    pub reference_pose: Vec<PoseFrame>,
    /// Perturbed twin pose, one entry per frame.
    pub twin_pose: Vec<PoseFrame>,
    /// Confidence radius per frame.
    pub confidence_radius: Vec<f64>,
}

impl PosePrediction {
    /// Number of frames in the prediction.
    pub fn frame_count(&self) -> usize {
        self.twin_pose.len()
    }
}

/// Provenance block echoed with every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub model_version: String,
    pub data_version: String,
    /// Output quality for direct runs; the variant id for scenario runs.
    pub recipe_id: String,
    /// Caller seed from the request.
    pub seed: u32,
    /// Content fingerprint derived from the trial id.
    pub raw_fingerprint: String,
    pub feature_snapshot_version: String,
    /// Run hash derived from the request seed.
    pub run_hash: String,
    /// BLAKE3 digest of the canonical request.
    pub request_digest: String,
}

/// Scalar gait metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub speed: f64,
    pub phase: f64,
    pub cadence: f64,
}

/// Categorical risk derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Normal,
    Warning,
    High,
}

impl RiskLevel {
    /// Maps a composite score total onto a risk level.
    pub fn from_total(total: f64) -> Self {
        if total > 82.0 {
            RiskLevel::Normal
        } else if total > 70.0 {
            RiskLevel::Warning
        } else {
            RiskLevel::High
        }
    }

    /// Returns the risk level as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Warning => "warning",
            RiskLevel::High => "high",
        }
    }
}

/// Four-way breakdown of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub input: f64,
    pub sync: f64,
    pub self_consistency: f64,
    pub ood: f64,
}

/// Composite twin score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinScore {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub risk_level: RiskLevel,
    pub trend: Vec<f64>,
}

/// Weight of one input channel, with the sub-window it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelWeight {
    pub id: String,
    pub weight: f64,
    pub window: TimeWindow,
}

/// Weight of one frequency band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandWeight {
    pub id: String,
    pub weight: f64,
}

/// Weight of one time slice, with the sub-window it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceWeight {
    pub id: String,
    pub weight: f64,
    pub window: TimeWindow,
}

/// Explainability weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explainability {
    pub channels: Vec<ChannelWeight>,
    pub bands: Vec<BandWeight>,
    pub time_slices: Vec<SliceWeight>,
}

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    High,
}

impl Severity {
    /// Returns the severity as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::High => "high",
        }
    }
}

/// A threshold alert over a sub-window of the request window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub label: String,
    pub severity: Severity,
    pub window: TimeWindow,
}

/// Identifier of a timeline track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackId {
    /// Signal quality.
    Qc,
    /// Twin score.
    TwinScore,
    /// Out-of-distribution level.
    Ood,
}

/// A per-frame numeric series in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineTrack {
    pub id: TrackId,
    pub values: Vec<f64>,
}

/// Discrete gait event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GaitEventKind {
    /// Heel strike.
    #[serde(rename = "HS")]
    HeelStrike,
    /// Toe off.
    #[serde(rename = "TO")]
    ToeOff,
}

/// A typed event on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GaitEventKind,
    pub time_ms: i64,
}

/// A named mark on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMark {
    pub id: String,
    pub label: String,
    pub time_ms: i64,
}

/// Timeline annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub tracks: Vec<TimelineTrack>,
    pub events: Vec<TimelineEvent>,
    pub marks: Vec<TimelineMark>,
}

impl Timeline {
    /// Returns the track with the given id.
    pub fn track(&self, id: TrackId) -> Option<&TimelineTrack> {
        self.tracks.iter().find(|t| t.id == id)
    }
}

/// Result of a synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Identifier derived from the request seed.
    pub run_id: String,
    /// Wall-clock creation time; the only field that varies between
    /// identical requests.
    pub created_at: DateTime<Utc>,
    /// Synthetic latency in milliseconds.
    pub latency_ms: u32,
    pub run_kind: RunKind,
    pub window: TimeWindow,
    pub prediction: PosePrediction,
    pub provenance: Provenance,
    pub metrics: Metrics,
    pub score: TwinScore,
    pub explain: Explainability,
    pub alerts: Vec<Alert>,
    pub timeline: Timeline,
}

impl RunResult {
    /// Parses a result from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the result to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the result to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the result to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Number of synthesized frames.
    pub fn frame_count(&self) -> usize {
        self.prediction.frame_count()
    }

    /// BLAKE3 hash of the canonical result with `created_at` removed.
    ///
    /// Two results from identical requests always share this digest.
    pub fn deterministic_digest(&self) -> Result<String, SpecError> {
        let mut value = self.to_value()?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("created_at");
        }
        canonical_value_hash(&value)
    }
}

/// A 2-D grid of synthetic stability scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Tested values of the first swept parameter.
    pub x: Vec<f64>,
    /// Tested values of the second swept parameter.
    pub y: Vec<f64>,
    /// Scores indexed `[y][x]`.
    pub heat: Vec<Vec<f64>>,
}

impl SweepResult {
    /// Returns the score at column `xi`, row `yi`.
    pub fn cell(&self, xi: usize, yi: usize) -> Option<f64> {
        self.heat.get(yi).and_then(|row| row.get(xi)).copied()
    }
}
