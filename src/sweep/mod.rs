//! Decade-adaptive concentration sweep.
//!
//! The sweep walks from `min_conc` towards `max_conc` in linear steps whose
//! size grows tenfold at every decade boundary:
//!
//! - start with `step = min_conc / 100` and `current = min_conc`
//! - emit `current`
//! - if `current ≈ step * 100`, multiply `step` by 10
//! - `current += step`
//! - stop (without emitting) once `current ≈ max_conc`
//!
//! `≈` is `approx_eq` with the configured precision. The boundaries are reached
//! by repeated addition, so exact comparison would miss them. With the default
//! bounds this gives 90 points per decade and 360 points in total.

use log::info;

use crate::domain::{SampleTable, SweepConfig, SweepPoint, SweepTable};
use crate::error::{AppError, EXIT_IO};
use crate::math::approx_eq;
use crate::models::responses_at;

/// Number of linear steps that make up one decade.
const STEPS_PER_DECADE: f64 = 100.0;

/// Growth factor of the step size at a decade boundary.
const DECADE: f64 = 10.0;

impl SweepConfig {
    /// Reject bounds the stepping algorithm cannot walk.
    pub fn validate(&self) -> Result<(), AppError> {
        let SweepConfig {
            min_conc,
            max_conc,
            precision,
        } = *self;

        if !(min_conc.is_finite() && max_conc.is_finite() && min_conc > 0.0 && max_conc > min_conc) {
            return Err(AppError::new(
                EXIT_IO,
                format!(
                    "Invalid concentration range: min={min_conc}, max={max_conc} (must be finite, >0, and max>min)."
                ),
            ));
        }
        if !(precision.is_finite() && precision > 0.0) {
            return Err(AppError::new(
                EXIT_IO,
                format!("Invalid precision: {precision} (must be finite and >0)."),
            ));
        }
        if min_conc / STEPS_PER_DECADE <= precision {
            return Err(AppError::new(
                EXIT_IO,
                format!(
                    "Minimum concentration {min_conc} is too small: the first step {} must exceed the precision {precision}.",
                    min_conc / STEPS_PER_DECADE
                ),
            ));
        }
        Ok(())
    }
}

/// Iterator over the swept concentrations.
#[derive(Debug, Clone)]
pub struct Concentrations {
    current: f64,
    step: f64,
    max: f64,
    precision: f64,
}

impl Concentrations {
    pub fn new(config: &SweepConfig) -> Self {
        Self {
            current: config.min_conc,
            step: config.min_conc / STEPS_PER_DECADE,
            max: config.max_conc,
            precision: config.precision,
        }
    }
}

impl Iterator for Concentrations {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        // Passing `max` only happens for bounds that are not on the step grid.
        if approx_eq(self.current, self.max, self.precision) || self.current > self.max {
            return None;
        }

        let conc = self.current;
        if approx_eq(conc, self.step * STEPS_PER_DECADE, self.precision) {
            self.step *= DECADE;
        }
        self.current += self.step;

        Some(conc)
    }
}

/// Evaluate every sample at every swept concentration.
pub fn evaluate(table: &SampleTable, config: &SweepConfig) -> SweepTable {
    let points: Vec<SweepPoint> = Concentrations::new(config)
        .map(|concentration| SweepPoint {
            concentration,
            responses: responses_at(&table.samples, concentration),
        })
        .collect();

    info!(
        "swept {} concentrations for {} samples",
        points.len(),
        table.len()
    );

    SweepTable { points }
}
