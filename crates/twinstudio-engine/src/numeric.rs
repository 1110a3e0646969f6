//! Rounding helpers.
//!
//! All rounding rounds half up (`floor(x + 0.5)`), including for negative
//! values, so `-2.5` rounds to `-2`.

/// Rounds to the nearest integer, ties toward positive infinity.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Rounds to 1 decimal place.
#[inline]
pub fn round1(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0
}

/// Rounds to 2 decimal places.
#[inline]
pub fn round2(x: f64) -> f64 {
    round_half_up(x * 100.0) / 100.0
}

/// Rounds to 3 decimal places.
#[inline]
pub fn round3(x: f64) -> f64 {
    round_half_up(x * 1000.0) / 1000.0
}

/// Rounds to an integer millisecond timestamp.
#[inline]
pub fn round_ms(x: f64) -> i64 {
    round_half_up(x) as i64
}
