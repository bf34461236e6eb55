//! Mathematical utilities: tolerant floating-point comparison.

pub mod float;

pub use float::*;
