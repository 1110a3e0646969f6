//! Arbitrary JSON through canonicalization.

#![no_main]

use libfuzzer_sys::fuzz_target;
use twinstudio_spec::hash::{canonicalize_json, derive_seed};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if let Ok(canonical) = canonicalize_json(&value) {
        // Canonical output re-parses to a value with the same canonical form.
        let reparsed: serde_json::Value =
            serde_json::from_str(&canonical).expect("canonical output is valid JSON");
        let again = canonicalize_json(&reparsed).expect("re-canonicalization succeeds");
        assert_eq!(derive_seed(&canonical), derive_seed(&again));
    }
});
