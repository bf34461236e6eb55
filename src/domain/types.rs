//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the sweep
//! - exported to TSV/JSON
//! - reloaded later for plotting

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Column headers the input table must carry, in order.
pub const EXPECTED_HEADERS: [&str; 4] = ["name", "ymin", "ymax", "EC50"];

/// Maximum number of samples a table may hold.
pub const MAX_SAMPLES: usize = 32;

/// Lower sweep bound (ligand concentration).
pub const DEFAULT_MIN_CONC: f64 = 1e-6;

/// Upper sweep bound (ligand concentration). Never emitted itself.
pub const DEFAULT_MAX_CONC: f64 = 1e-2;

/// Absolute tolerance used for every floating-point equality test.
pub const PRECISION: f64 = 1e-9;

/// Fit parameters for one sample, as read from one data line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub name: String,
    pub ymin: f64,
    pub ymax: f64,
    #[serde(rename = "EC50")]
    pub ec50: f64,
}

/// Parsed input: samples in file order.
///
/// The order is the output column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    pub samples: Vec<SampleRecord>,
}

impl SampleTable {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.name.as_str())
    }
}

/// Bounds and tolerance of the concentration sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub min_conc: f64,
    pub max_conc: f64,
    pub precision: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_conc: DEFAULT_MIN_CONC,
            max_conc: DEFAULT_MAX_CONC,
            precision: PRECISION,
        }
    }
}

/// One emitted concentration and the response of every sample at it.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub concentration: f64,
    pub responses: Vec<f64>,
}

impl SweepPoint {
    pub fn log10_conc(&self) -> f64 {
        self.concentration.log10()
    }
}

/// The full response matrix (concentration rows × sample columns).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepTable {
    pub points: Vec<SweepPoint>,
}

impl SweepTable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(log10(c), response)` pairs for the sample in column `idx`.
    pub fn series(&self, idx: usize) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.responses.get(idx).map(|&r| (p.log10_conc(), r)))
            .collect()
    }
}

/// Resolved configuration for a `dcurve sweep` run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sweep: SweepConfig,
    /// Reject numeric fields that are not entirely a valid literal instead of
    /// decoding their longest valid prefix.
    pub strict_numbers: bool,
    pub export_json: Option<PathBuf>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub quiet: bool,
}

/// Portable representation of a computed sweep (`--export-json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub min_conc: f64,
    pub max_conc: f64,
    pub samples: Vec<SampleRecord>,
    pub grid: CurveGrid,
}

/// Sweep grid: `responses[i][k]` is sample `i` at `log10_conc[k]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    pub log10_conc: Vec<f64>,
    pub responses: Vec<Vec<f64>>,
}

impl CurveFile {
    pub fn series(&self, idx: usize) -> Vec<(f64, f64)> {
        let Some(ys) = self.grid.responses.get(idx) else {
            return Vec::new();
        };
        self.grid
            .log10_conc
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| (x, y))
            .collect()
    }
}
