//! TwinStudio synthesis engine.
//!
//! Turns a validated [`RunRequest`](twinstudio_spec::RunRequest) into a
//! deterministic [`RunResult`](twinstudio_spec::RunResult): pose sequences,
//! a composite score, timeline annotations, explainability weights and
//! alerts. Also provides the sweep grid and scenario variant comparison.
//!
//! # Determinism
//!
//! All synthetic values come from one [`rng::Xorshift32`] cursor seeded by
//! FNV-1a over the canonical request. Only `created_at` depends on the
//! wall clock; use [`synthesize_at`] to pin it.
//!
//! # Example
//!
//! ```
//! use twinstudio_engine::{sweep, synthesize};
//! use twinstudio_spec::RunRequest;
//!
//! let request = RunRequest::builder("trial_001").seed(42).build();
//!
//! let run = synthesize(&request).unwrap();
//! assert_eq!(run.frame_count(), 48);
//!
//! let grid = sweep(&request).unwrap();
//! assert_eq!(grid.heat.len(), 6);
//! ```

pub mod error;
pub mod numeric;
pub mod rng;
pub mod scenario;
pub mod sweep;
pub mod synthesis;

pub use error::{EngineError, EngineResult};
pub use rng::Xorshift32;
pub use scenario::{compare_variants, compare_variants_at, compare_variants_with};
pub use sweep::sweep;
pub use synthesis::{frame_count, synthesize, synthesize_at};
