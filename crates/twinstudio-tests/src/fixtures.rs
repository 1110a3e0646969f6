//! Request and scenario documents shared by the integration tests.

use twinstudio_spec::{RunRequest, ScenarioSet};

/// Standard-mode request with the default preset values.
pub const REQUEST_DEFAULT: &str = include_str!("../fixtures/request_default.json");

/// Calibrated lab request with explicit channels, keys in non-sorted order.
pub const REQUEST_CALIBRATED_LAB: &str = include_str!("../fixtures/request_calibrated_lab.json");

/// Request that parses but fails six validation checks.
pub const REQUEST_INVALID: &str = include_str!("../fixtures/request_invalid.json");

/// Three-variant scenario over a shared base recipe.
pub const SCENARIO_SYNC_STUDY: &str = include_str!("../fixtures/scenario_sync_study.json");

/// Every valid request fixture, by name.
pub const VALID_REQUESTS: &[(&str, &str)] = &[
    ("request_default", REQUEST_DEFAULT),
    ("request_calibrated_lab", REQUEST_CALIBRATED_LAB),
];

/// Parses a request fixture.
///
/// # Panics
/// Panics if the fixture is not a well-formed request document.
pub fn request(json: &str) -> RunRequest {
    RunRequest::from_json(json).expect("fixture request should parse")
}

/// Parses a scenario fixture.
///
/// # Panics
/// Panics if the fixture is not a well-formed scenario document.
pub fn scenario(json: &str) -> ScenarioSet {
    ScenarioSet::from_json(json).expect("fixture scenario should parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        for (name, json) in VALID_REQUESTS {
            let parsed = request(json);
            assert!(!parsed.trial_id.is_empty(), "{}", name);
        }
        request(REQUEST_INVALID);
        assert_eq!(scenario(SCENARIO_SYNC_STUDY).variants.len(), 3);
    }
}
