//! Canonicalization, seed derivation and request digests.
//!
//! This module implements the determinism policy for twinstudio:
//! - Request canonicalization (sorted keys, compact JSON)
//! - FNV-1a seed derivation from the canonical string
//! - BLAKE3 content digests for provenance and tooling

use crate::error::SpecError;
use crate::request::RunRequest;

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Maximum nesting depth accepted by the canonicalizer.
pub const MAX_CANONICAL_DEPTH: usize = 128;

/// Canonicalizes a JSON value.
///
/// This produces a deterministic JSON string where:
/// - Object keys are sorted lexicographically at every level
/// - Arrays keep positional order
/// - No whitespace between tokens
/// - Integral numbers print without a fraction
/// - Strings use minimal escaping
///
/// Non-finite numbers and nesting deeper than [`MAX_CANONICAL_DEPTH`] are
/// rejected.
///
/// # Example
/// ```
/// use twinstudio_spec::hash::canonicalize_json;
///
/// let value = serde_json::json!({"b": 1, "a": {"d": [3, 1], "c": true}});
/// let canonical = canonicalize_json(&value).unwrap();
/// assert_eq!(canonical, r#"{"a":{"c":true,"d":[3,1]},"b":1}"#);
/// ```
pub fn canonicalize_json(value: &serde_json::Value) -> Result<String, SpecError> {
    let mut out = String::new();
    canonicalize_value(value, 0, &mut out)?;
    Ok(out)
}

fn canonicalize_value(
    value: &serde_json::Value,
    depth: usize,
    out: &mut String,
) -> Result<(), SpecError> {
    if depth > MAX_CANONICAL_DEPTH {
        return Err(SpecError::Canonicalization(format!(
            "nesting exceeds {} levels",
            MAX_CANONICAL_DEPTH
        )));
    }

    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_number(n)?),
        serde_json::Value::String(s) => out.push_str(&format_string(s)),
        serde_json::Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                canonicalize_value(item, depth + 1, out)?;
            }
            out.push(']');
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&format_string(key));
                out.push(':');
                canonicalize_value(item, depth + 1, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Formats a number in canonical form.
fn format_number(n: &serde_json::Number) -> Result<String, SpecError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    let f = n
        .as_f64()
        .ok_or_else(|| SpecError::Canonicalization(format!("unrepresentable number: {}", n)))?;
    if !f.is_finite() {
        return Err(SpecError::Canonicalization(format!(
            "non-finite number: {}",
            f
        )));
    }
    if f == 0.0 {
        return Ok("0".to_string());
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return Ok(format!("{}", f as i64));
    }
    Ok(format!("{}", f))
}

/// Formats a string with minimal escaping.
fn format_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Derives a 32-bit seed from a canonical string using FNV-1a.
///
/// ```text
/// h = 2166136261
/// for each character c: h = (h ^ c) * 16777619   (mod 2^32)
/// ```
///
/// # Example
/// ```
/// use twinstudio_spec::hash::derive_seed;
///
/// assert_eq!(derive_seed(""), 0x811c9dc5);
/// assert_eq!(derive_seed("a"), 0xe40c292c);
/// ```
pub fn derive_seed(canonical: &str) -> u32 {
    canonical.chars().fold(FNV_OFFSET_BASIS, |hash, c| {
        (hash ^ c as u32).wrapping_mul(FNV_PRIME)
    })
}

/// Returns the canonical string of a run request.
pub fn canonical_request_string(request: &RunRequest) -> Result<String, SpecError> {
    let value = request.to_value()?;
    canonicalize_json(&value)
}

/// Derives the synthesis seed of a run request.
pub fn request_seed(request: &RunRequest) -> Result<u32, SpecError> {
    Ok(derive_seed(&canonical_request_string(request)?))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn canonical_value_hash(value: &serde_json::Value) -> Result<String, SpecError> {
    let canonical = canonicalize_json(value)?;
    Ok(blake3_hash_str(&canonical))
}

/// Computes the canonical BLAKE3 hash of a run request.
///
/// ```text
/// request_digest = hex(BLAKE3(canonical(request_json)))
/// ```
pub fn canonical_request_hash(request: &RunRequest) -> Result<String, SpecError> {
    let canonical = canonical_request_string(request)?;
    Ok(blake3_hash_str(&canonical))
}

/// Computes a BLAKE3 hash of a string.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn blake3_hash_str(s: &str) -> String {
    blake3::hash(s.as_bytes()).to_hex().to_string()
}
