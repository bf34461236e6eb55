//! Reporting utilities: sweep statistics and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::SweepTable;

/// Summary stats about an evaluated sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepStats {
    pub n_points: usize,
    pub conc_min: f64,
    pub conc_max: f64,
    /// `(min, max)` response per sample, in table order.
    pub response_ranges: Vec<(f64, f64)>,
}

/// Compute sweep stats, or `None` for an empty sweep.
pub fn compute_stats(sweep: &SweepTable) -> Option<SweepStats> {
    let first = sweep.points.first()?;
    let mut conc_min = f64::INFINITY;
    let mut conc_max = f64::NEG_INFINITY;
    let mut response_ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); first.responses.len()];

    for p in &sweep.points {
        conc_min = conc_min.min(p.concentration);
        conc_max = conc_max.max(p.concentration);
        for (range, &r) in response_ranges.iter_mut().zip(&p.responses) {
            range.0 = range.0.min(r);
            range.1 = range.1.max(r);
        }
    }

    Some(SweepStats {
        n_points: sweep.len(),
        conc_min,
        conc_max,
        response_ranges,
    })
}
