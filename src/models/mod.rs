//! Dose-response model.
//!
//! The model is a small, pure function so the sweep code can stay generic.

pub mod model;

pub use model::*;
