//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - parsed input (`SampleRecord`, `SampleTable`)
//! - sweep configuration and output (`SweepConfig`, `SweepPoint`, `SweepTable`)
//! - the portable curve file schema (`CurveFile`)

pub mod types;

pub use types::*;
