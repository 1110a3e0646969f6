//! Recipe types: the structured simulation configuration.
//!
//! A [`Recipe`] has five sections (`eeg`, `emg`, `sync`, `prior`, `output`).
//! A [`RecipePatch`] mirrors it with every section and field optional and is
//! used by scenario variants and macros to override parts of a base recipe.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Number of secondary-channel gains in the default recipe.
pub const DEFAULT_GAIN_CHANNELS: usize = 8;

/// Noise spectrum of the primary signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseType {
    /// Flat spectrum.
    White,
    /// 1/f spectrum.
    #[serde(alias = "1f")]
    Pink,
}

impl NoiseType {
    /// Returns the noise type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseType::White => "white",
            NoiseType::Pink => "pink",
        }
    }
}

/// How the channel mask selects channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    /// Channels are selected through anatomical groups.
    Group,
    /// Channels are listed explicitly by id.
    Explicit,
}

/// Named anatomical channel groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelGroup {
    MotorStripLeft,
    MotorStripRight,
    LeftHemi,
    RightHemi,
}

impl ChannelGroup {
    /// Returns the group name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelGroup::MotorStripLeft => "motor_strip_left",
            ChannelGroup::MotorStripRight => "motor_strip_right",
            ChannelGroup::LeftHemi => "left_hemi",
            ChannelGroup::RightHemi => "right_hemi",
        }
    }
}

/// Channel selection for the primary signal.
///
/// Both lists are kept regardless of `mode`; only the list matching the mode
/// is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelMask {
    /// Which list is active.
    pub mode: MaskMode,
    /// Selected anatomical groups.
    #[serde(default)]
    pub groups: Vec<ChannelGroup>,
    /// Explicitly selected channel ids (`Ch1`..`Ch64`).
    #[serde(default)]
    pub explicit: Vec<String>,
}

impl ChannelMask {
    /// Creates a group-mode mask.
    pub fn groups(groups: impl IntoIterator<Item = ChannelGroup>) -> Self {
        Self {
            mode: MaskMode::Group,
            groups: groups.into_iter().collect(),
            explicit: Vec::new(),
        }
    }

    /// Creates an explicit-mode mask.
    pub fn explicit<S: Into<String>>(channels: impl IntoIterator<Item = S>) -> Self {
        Self {
            mode: MaskMode::Explicit,
            groups: Vec::new(),
            explicit: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the active selection is empty.
    pub fn is_empty(&self) -> bool {
        match self.mode {
            MaskMode::Group => self.groups.is_empty(),
            MaskMode::Explicit => self.explicit.is_empty(),
        }
    }
}

/// Primary signal noise parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EegParams {
    pub noise_type: NoiseType,
    /// Noise standard deviation, in [0, 3].
    pub noise_sigma: f64,
    pub channel_mask: ChannelMask,
}

/// Secondary channel parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmgParams {
    pub enabled: bool,
    /// Per-channel gain, each in [0.5, 2].
    pub gain: Vec<f64>,
    /// Delay in milliseconds, in [0, 200].
    pub delay_ms: f64,
}

/// Synchronization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncParams {
    /// Jitter in milliseconds, in [0, 50].
    pub jitter_ms: f64,
    /// Dropout probability, in [0, 1].
    pub dropout_rate: f64,
}

/// Prior strength parameters, both in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriorParams {
    pub skeleton_strength: f64,
    pub dynamics_smoothness: f64,
}

/// Output quality selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputQuality {
    Preview,
    Bake,
}

impl OutputQuality {
    /// Returns the quality as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputQuality::Preview => "preview",
            OutputQuality::Bake => "bake",
        }
    }
}

/// Output parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputParams {
    pub quality: OutputQuality,
}

/// The full simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    pub eeg: EegParams,
    pub emg: EmgParams,
    pub sync: SyncParams,
    pub prior: PriorParams,
    pub output: OutputParams,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            eeg: EegParams {
                noise_type: NoiseType::White,
                noise_sigma: 1.2,
                channel_mask: ChannelMask::groups([ChannelGroup::MotorStripLeft]),
            },
            emg: EmgParams {
                enabled: true,
                gain: vec![1.0; DEFAULT_GAIN_CHANNELS],
                delay_ms: 40.0,
            },
            sync: SyncParams {
                jitter_ms: 10.0,
                dropout_rate: 0.05,
            },
            prior: PriorParams {
                skeleton_strength: 0.7,
                dynamics_smoothness: 0.6,
            },
            output: OutputParams {
                quality: OutputQuality::Preview,
            },
        }
    }
}

/// Copies every `Some` field of a patch section onto the target section.
macro_rules! overlay {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(ref value) = $patch.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

impl Recipe {
    /// Parses a recipe from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the recipe to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Returns a new recipe with `patch` merged over this one.
    ///
    /// Merging is section-wise: sections and fields absent from the patch keep
    /// this recipe's values, and every field the patch specifies replaces the
    /// base field wholesale. Collections (channel mask, group and channel
    /// lists, gain vectors) are never merged element-wise.
    ///
    /// # Example
    /// ```
    /// use twinstudio_spec::{Recipe, RecipePatch};
    ///
    /// let patch = RecipePatch::from_json(r#"{"sync": {"jitter_ms": 18}}"#).unwrap();
    /// let merged = Recipe::default().apply_patch(&patch);
    ///
    /// assert_eq!(merged.sync.jitter_ms, 18.0);
    /// assert_eq!(merged.sync.dropout_rate, Recipe::default().sync.dropout_rate);
    /// assert_eq!(merged.eeg, Recipe::default().eeg);
    /// ```
    pub fn apply_patch(&self, patch: &RecipePatch) -> Recipe {
        let mut merged = self.clone();
        if let Some(ref eeg) = patch.eeg {
            overlay!(merged.eeg, eeg, noise_type, noise_sigma, channel_mask);
        }
        if let Some(ref emg) = patch.emg {
            overlay!(merged.emg, emg, enabled, gain, delay_ms);
        }
        if let Some(ref sync) = patch.sync {
            overlay!(merged.sync, sync, jitter_ms, dropout_rate);
        }
        if let Some(ref prior) = patch.prior {
            overlay!(merged.prior, prior, skeleton_strength, dynamics_smoothness);
        }
        if let Some(ref output) = patch.output {
            overlay!(merged.output, output, quality);
        }
        merged
    }
}

/// Partial override of [`EegParams`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EegPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_type: Option<NoiseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_sigma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_mask: Option<ChannelMask>,
}

/// Partial override of [`EmgParams`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmgPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<f64>,
}

/// Partial override of [`SyncParams`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropout_rate: Option<f64>,
}

/// Partial override of [`PriorParams`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeleton_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamics_smoothness: Option<f64>,
}

/// Partial override of [`OutputParams`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<OutputQuality>,
}

/// Partial override of a [`Recipe`].
///
/// Unknown sections or fields are rejected when the patch is parsed, so a
/// patch that names something outside the recipe schema never reaches a merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eeg: Option<EegPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emg: Option<EmgPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<PriorPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputPatch>,
}

impl RecipePatch {
    /// Parses a patch from a JSON string, rejecting unknown sections and fields.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        serde_json::from_str(json).map_err(|e| SpecError::Merge(e.to_string()))
    }

    /// Parses a patch from a JSON value, rejecting unknown sections and fields.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SpecError> {
        serde_json::from_value(value).map_err(|e| SpecError::Merge(e.to_string()))
    }

    /// Returns true if the patch overrides nothing.
    pub fn is_empty(&self) -> bool {
        self.eeg.is_none()
            && self.emg.is_none()
            && self.sync.is_none()
            && self.prior.is_none()
            && self.output.is_none()
    }
}
