//! Template command implementation
//!
//! Prints a run request built from a preset, optionally with macros applied.

use anyhow::{anyhow, Result};
use std::process::ExitCode;
use twinstudio_spec::{apply_macro, find_macro, preset, RunKind, RunRequest, PRESET_NAMES};

use super::json_output::to_json;

/// Options for the template command.
#[derive(Debug, Clone)]
pub struct TemplateOptions {
    pub preset: String,
    pub macros: Vec<String>,
    pub trial_id: String,
    pub seed: u32,
    pub run_kind: RunKind,
    pub calibration_tag: Option<String>,
    pub window: (f64, f64),
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
            macros: Vec::new(),
            trial_id: "trial_001".to_string(),
            seed: 0,
            run_kind: RunKind::Preview,
            calibration_tag: None,
            window: (0.0, 1200.0),
        }
    }
}

/// Builds the request described by `options`.
pub fn build_request(options: &TemplateOptions) -> Result<RunRequest> {
    let mut recipe = preset(&options.preset).ok_or_else(|| {
        anyhow!(
            "unknown preset: {} (expected one of {})",
            options.preset,
            PRESET_NAMES.join(", ")
        )
    })?;
    for id in &options.macros {
        let m = find_macro(id).ok_or_else(|| anyhow!("unknown macro: {}", id))?;
        recipe = apply_macro(&recipe, &m);
    }

    let mut builder = RunRequest::builder(options.trial_id.clone())
        .window(options.window.0, options.window.1)
        .recipe(recipe)
        .seed(options.seed)
        .run_kind(options.run_kind);
    if let Some(tag) = &options.calibration_tag {
        builder = builder.calibration_tag(tag.clone());
    }
    Ok(builder.build())
}

/// Run the template command
pub fn run(options: &TemplateOptions, pretty: bool) -> Result<ExitCode> {
    let request = build_request(options)?;
    println!("{}", to_json(&request, pretty)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinstudio_spec::validation::validate_request;

    #[test]
    fn test_default_template_is_valid() {
        let request = build_request(&TemplateOptions::default()).unwrap();
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_preset_and_macro() {
        let options = TemplateOptions {
            preset: "high_noise".to_string(),
            macros: vec!["high_smoothing".to_string()],
            calibration_tag: Some("cal_v2".to_string()),
            ..TemplateOptions::default()
        };
        let request = build_request(&options).unwrap();
        assert_eq!(request.recipe.eeg.noise_sigma, 2.4);
        assert_eq!(request.recipe.prior.skeleton_strength, 0.85);
        assert!(request.has_calibration());
    }

    #[test]
    fn test_unknown_preset() {
        let options = TemplateOptions {
            preset: "loud".to_string(),
            ..TemplateOptions::default()
        };
        let err = build_request(&options).unwrap_err();
        assert!(err.to_string().contains("low_noise"));
    }

    #[test]
    fn test_unknown_macro() {
        let options = TemplateOptions {
            macros: vec!["nope".to_string()],
            ..TemplateOptions::default()
        };
        assert!(build_request(&options).is_err());
    }
}
