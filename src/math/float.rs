//! Floating-point equality with an absolute tolerance.
//!
//! The sweep accumulates its concentration by repeated addition, so the values
//! it compares against (decade boundaries, the upper bound) are never hit
//! exactly. Every equality test in the crate goes through `approx_eq`.

/// `|a - b| < precision`.
pub fn approx_eq(a: f64, b: f64, precision: f64) -> bool {
    (a - b).abs() < precision
}
