//! Determinism testing framework for twinstudio.
//!
//! Every synthesis entry point must be a pure function of the canonical
//! request: the same request, in any key order, produces the same result
//! bytes on every call. The only field exempt from this is `created_at`,
//! which the harness pins with [`fixed_timestamp`].
//!
//! # Example
//!
//! ```rust
//! use twinstudio_tests::determinism::{verify_determinism, DeterminismFixture, Operation};
//! use twinstudio_tests::fixtures::REQUEST_DEFAULT;
//!
//! let result = verify_determinism(|| REQUEST_DEFAULT.as_bytes().to_vec(), 3);
//! assert!(result.is_deterministic);
//!
//! let report = DeterminismFixture::new()
//!     .add_request("default", REQUEST_DEFAULT)
//!     .operation(Operation::Sweep)
//!     .runs(2)
//!     .run();
//! report.assert_all_deterministic();
//! ```

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use twinstudio_engine::{compare_variants_at, sweep, synthesize_at};
use twinstudio_spec::hash::canonicalize_json;
use twinstudio_spec::{RunRequest, ScenarioSet};

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// The first byte difference found between two runs.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    /// Byte offset of the difference.
    pub offset: usize,
    /// Byte from the first run, if it has one at `offset`.
    pub expected: Option<u8>,
    /// Byte from the differing run, if it has one at `offset`.
    pub actual: Option<u8>,
    /// Which run (0-indexed) differed.
    pub run_index: usize,
    /// Text of the first run around the difference.
    pub context: String,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |b: Option<u8>| match b {
            Some(b) => format!("0x{:02X}", b),
            None => "EOF".to_string(),
        };
        write!(
            f,
            "Difference at byte {}: expected {}, got {} (run {})",
            self.offset,
            show(self.expected),
            show(self.actual),
            self.run_index
        )?;
        if !self.context.is_empty() {
            write!(f, "\n  Context: ...{}...", self.context)?;
        }
        Ok(())
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output size: {} bytes\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// Runs `generate_fn` `runs` times and verifies all outputs are identical.
///
/// # Panics
/// Panics if `runs < 2`.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference_bytes = reference.as_ref();
    let hash = compute_hash(reference_bytes);

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(diff) = find_first_difference(reference_bytes, output.as_ref(), run_index) {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                output_size: reference_bytes.len(),
                hash,
                diff_info: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: reference_bytes.len(),
        hash,
        diff_info: None,
    }
}

/// Finds the first differing byte, including a length mismatch.
fn find_first_difference(expected: &[u8], actual: &[u8], run_index: usize) -> Option<DiffInfo> {
    let offset = expected
        .iter()
        .zip(actual.iter())
        .position(|(e, a)| e != a)
        .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())))?;

    Some(DiffInfo {
        offset,
        expected: expected.get(offset).copied(),
        actual: actual.get(offset).copied(),
        run_index,
        context: extract_context(expected, offset),
    })
}

/// Up to 24 bytes of text either side of `offset`.
fn extract_context(data: &[u8], offset: usize) -> String {
    let start = offset.saturating_sub(24);
    let end = (offset + 24).min(data.len());
    String::from_utf8_lossy(&data[start..end]).into_owned()
}

/// Returns true if every hash in `hashes` is identical.
pub fn verify_hash_determinism(hashes: &[String]) -> bool {
    hashes.windows(2).all(|pair| pair[0] == pair[1])
}

/// Compute BLAKE3 hash of data.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Creation timestamp pinned by the harness.
pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}

/// Canonical JSON bytes of any serializable output.
pub fn canonical_bytes<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, DeterminismError> {
    let value =
        serde_json::to_value(value).map_err(|e| DeterminismError::Serialize(e.to_string()))?;
    canonicalize_json(&value)
        .map(String::into_bytes)
        .map_err(|e| DeterminismError::Serialize(e.to_string()))
}

/// Synthesizes `request` with the pinned timestamp, as canonical bytes.
pub fn run_bytes(request: &RunRequest) -> Result<Vec<u8>, DeterminismError> {
    let result = synthesize_at(request, fixed_timestamp())
        .map_err(|e| DeterminismError::GenerationFailed(e.to_string()))?;
    canonical_bytes(&result)
}

/// Sweeps `request`, as canonical bytes.
pub fn sweep_bytes(request: &RunRequest) -> Result<Vec<u8>, DeterminismError> {
    let grid = sweep(request).map_err(|e| DeterminismError::GenerationFailed(e.to_string()))?;
    canonical_bytes(&grid)
}

/// Compares every variant of `scenario` with the pinned timestamp, as canonical bytes.
pub fn compare_bytes(scenario: &ScenarioSet) -> Result<Vec<u8>, DeterminismError> {
    let results = compare_variants_at(scenario, &scenario.default_template(), fixed_timestamp())
        .map_err(|e| DeterminismError::GenerationFailed(e.to_string()))?;
    canonical_bytes(&results)
}

/// Entry point exercised by a [`DeterminismFixture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Single run synthesis.
    Run,
    /// Parameter sweep grid.
    Sweep,
}

/// Runs determinism checks across several request documents.
#[derive(Debug, Clone)]
pub struct DeterminismFixture {
    /// Named request JSON documents.
    pub requests: Vec<(String, String)>,
    /// Operation under test.
    pub operation: Operation,
    /// Number of runs per request.
    pub runs: usize,
}

impl Default for DeterminismFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterminismFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            operation: Operation::Run,
            runs: 3,
        }
    }

    /// Add a named request document.
    pub fn add_request(mut self, name: impl Into<String>, json: impl Into<String>) -> Self {
        self.requests.push((name.into(), json.into()));
        self
    }

    /// Select the operation under test.
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Set the number of runs per request.
    pub fn runs(mut self, runs: usize) -> Self {
        assert!(runs >= 2, "Must run at least 2 times");
        self.runs = runs;
        self
    }

    /// Run determinism checks for all requests.
    pub fn run(&self) -> DeterminismReport {
        let entries = self
            .requests
            .iter()
            .map(|(name, json)| DeterminismReportEntry {
                name: name.clone(),
                result: self.verify_request(json),
            })
            .collect();
        DeterminismReport { entries }
    }

    fn verify_request(&self, json: &str) -> Result<DeterminismResult, DeterminismError> {
        let request =
            RunRequest::from_json(json).map_err(|e| DeterminismError::ParseError(e.to_string()))?;
        let produce = match self.operation {
            Operation::Run => run_bytes,
            Operation::Sweep => sweep_bytes,
        };

        // Surface engine errors once instead of comparing empty outputs.
        produce(&request)?;
        Ok(verify_determinism(
            || produce(&request).unwrap_or_default(),
            self.runs,
        ))
    }
}

/// Error type for determinism testing.
#[derive(Debug, Clone)]
pub enum DeterminismError {
    /// Error parsing request JSON.
    ParseError(String),
    /// The engine rejected the request.
    GenerationFailed(String),
    /// Output could not be canonicalized.
    Serialize(String),
}

impl fmt::Display for DeterminismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::GenerationFailed(e) => write!(f, "Generation failed: {}", e),
            Self::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for DeterminismError {}

/// Entry in a determinism report for a single request.
#[derive(Debug)]
pub struct DeterminismReportEntry {
    /// Fixture name.
    pub name: String,
    /// Result of the determinism check.
    pub result: Result<DeterminismResult, DeterminismError>,
}

impl DeterminismReportEntry {
    /// Check if this entry passed determinism verification.
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(r) if r.is_deterministic)
    }
}

/// Report of determinism checks across multiple requests.
#[derive(Debug, Default)]
pub struct DeterminismReport {
    /// Individual entries.
    pub entries: Vec<DeterminismReportEntry>,
}

impl DeterminismReport {
    /// Check if every request passed.
    pub fn all_deterministic(&self) -> bool {
        self.entries.iter().all(|e| e.passed())
    }

    /// Number of passed entries.
    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.passed()).count()
    }

    /// Panic if any entry failed, with the full report.
    pub fn assert_all_deterministic(&self) {
        if !self.all_deterministic() {
            panic!("Determinism verification failed!\n{}", self);
        }
    }
}

impl fmt::Display for DeterminismReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Determinism Report: {}/{} passed",
            self.passed_count(),
            self.entries.len()
        )?;
        for entry in &self.entries {
            let status = if entry.passed() { "PASS" } else { "FAIL" };
            writeln!(f, "  [{}] {}", status, entry.name)?;
            match &entry.result {
                Ok(result) => {
                    if let Some(diff) = &result.diff_info {
                        writeln!(f, "        {}", diff)?;
                    }
                }
                Err(e) => writeln!(f, "        Error: {}", e)?,
            }
        }
        Ok(())
    }
}

/// Generates a test that evaluates an expression several times and checks
/// the outputs are byte-identical.
///
/// ```rust,ignore
/// test_determinism!(default_run, {
///     run_bytes(&request).unwrap()
/// });
///
/// test_determinism!(default_sweep, runs = 5, {
///     sweep_bytes(&request).unwrap()
/// });
/// ```
#[macro_export]
macro_rules! test_determinism {
    ($name:ident, $generate:expr) => {
        $crate::test_determinism!($name, runs = 3, $generate);
    };
    ($name:ident, runs = $runs:expr, $generate:expr) => {
        #[test]
        fn $name() {
            $crate::determinism::verify_determinism(|| $generate, $runs).assert_deterministic();
        }
    };
}
