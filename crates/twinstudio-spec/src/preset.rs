//! Built-in recipe presets and macros.
//!
//! Presets are complete recipes; macros are named [`RecipePatch`]es applied
//! with the same merge the scenario comparator uses.

use crate::recipe::{
    ChannelGroup, ChannelMask, EegParams, EegPatch, EmgParams, NoiseType, OutputParams,
    OutputQuality, PriorParams, PriorPatch, Recipe, RecipePatch, SyncParams, SyncPatch,
    DEFAULT_GAIN_CHANNELS,
};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &["default", "low_noise", "high_noise"];

/// A named recipe patch.
#[derive(Debug, Clone, PartialEq)]
pub struct Macro {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub patch: RecipePatch,
}

/// Returns the preset recipe with the given name.
pub fn preset(name: &str) -> Option<Recipe> {
    match name {
        "default" => Some(Recipe::default()),
        "low_noise" => Some(low_noise()),
        "high_noise" => Some(high_noise()),
        _ => None,
    }
}

fn low_noise() -> Recipe {
    Recipe {
        eeg: EegParams {
            noise_type: NoiseType::White,
            noise_sigma: 0.6,
            channel_mask: ChannelMask::groups([ChannelGroup::LeftHemi]),
        },
        emg: EmgParams {
            enabled: true,
            gain: vec![0.9; DEFAULT_GAIN_CHANNELS],
            delay_ms: 30.0,
        },
        sync: SyncParams {
            jitter_ms: 6.0,
            dropout_rate: 0.03,
        },
        prior: PriorParams {
            skeleton_strength: 0.75,
            dynamics_smoothness: 0.7,
        },
        output: OutputParams {
            quality: OutputQuality::Preview,
        },
    }
}

fn high_noise() -> Recipe {
    Recipe {
        eeg: EegParams {
            noise_type: NoiseType::Pink,
            noise_sigma: 2.4,
            channel_mask: ChannelMask::groups([ChannelGroup::RightHemi]),
        },
        emg: EmgParams {
            enabled: true,
            gain: vec![1.3; DEFAULT_GAIN_CHANNELS],
            delay_ms: 90.0,
        },
        sync: SyncParams {
            jitter_ms: 18.0,
            dropout_rate: 0.18,
        },
        prior: PriorParams {
            skeleton_strength: 0.55,
            dynamics_smoothness: 0.45,
        },
        output: OutputParams {
            quality: OutputQuality::Bake,
        },
    }
}

/// Returns the built-in macros.
pub fn macros() -> Vec<Macro> {
    vec![
        Macro {
            id: "focus_low_noise",
            name: "Focus Low Noise",
            description: "Reduce EEG noise and tighten sync jitter.",
            patch: RecipePatch {
                eeg: Some(EegPatch {
                    noise_type: Some(NoiseType::White),
                    noise_sigma: Some(0.6),
                    channel_mask: None,
                }),
                sync: Some(SyncPatch {
                    jitter_ms: Some(6.0),
                    dropout_rate: Some(0.03),
                }),
                ..RecipePatch::default()
            },
        },
        Macro {
            id: "high_smoothing",
            name: "High Smoothing",
            description: "Increase smoothing for stable motion.",
            patch: RecipePatch {
                prior: Some(PriorPatch {
                    skeleton_strength: Some(0.85),
                    dynamics_smoothness: Some(0.85),
                }),
                ..RecipePatch::default()
            },
        },
    ]
}

/// Looks up a macro by id.
pub fn find_macro(id: &str) -> Option<Macro> {
    macros().into_iter().find(|m| m.id == id)
}

/// Applies a macro to a recipe.
pub fn apply_macro(recipe: &Recipe, m: &Macro) -> Recipe {
    recipe.apply_patch(&m.patch)
}
