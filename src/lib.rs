//! `dose-curves` library crate.
//!
//! The binary (`dcurve`) is a thin wrapper around this library so that:
//!
//! - the parser and the sweep are testable without spawning processes
//! - the output writers can be reused on in-memory buffers

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod sweep;
