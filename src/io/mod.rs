//! Input/output helpers.
//!
//! - strict TSV ingest + validation (`table`)
//! - response matrix export (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod table;

pub use curve::*;
pub use export::*;
pub use table::*;
