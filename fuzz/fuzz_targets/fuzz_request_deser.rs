//! Arbitrary bytes through request parsing, validation and synthesis.

#![no_main]

use libfuzzer_sys::fuzz_target;
use twinstudio_engine::{sweep, synthesize};
use twinstudio_spec::validation::validate_request;
use twinstudio_spec::RunRequest;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(request) = RunRequest::from_json(text) else {
        return;
    };

    // Synthesis must agree with validation: never panic, only reject.
    let valid = validate_request(&request).is_ok();
    assert_eq!(synthesize(&request).is_ok(), valid);
    assert_eq!(sweep(&request).is_ok(), valid);
});
