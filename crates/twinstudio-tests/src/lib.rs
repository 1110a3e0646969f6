//! twinstudio End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the flows that must stay
//! reproducible:
//!
//! - Validation: request and scenario documents -> diagnostics
//! - Canonicalization: key order and formatting never change the seed
//! - **Determinism**: byte-identical run, sweep and comparison output
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p twinstudio-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use twinstudio_tests::determinism::{run_bytes, verify_determinism};
//! use twinstudio_tests::test_determinism;
//!
//! let result = verify_determinism(|| run_bytes(&request).unwrap(), 3);
//! assert!(result.is_deterministic);
//!
//! test_determinism!(default_run, {
//!     run_bytes(&request).unwrap()
//! });
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{
    compute_hash, verify_determinism, verify_hash_determinism, DeterminismError,
    DeterminismFixture, DeterminismReport, DeterminismResult, Operation,
};
