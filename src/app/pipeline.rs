//! Shared "sweep pipeline" logic.
//!
//! Keeping this in one place keeps the core workflow free of presentation:
//! parameter table -> validation -> sweep -> response matrix
//!
//! Nothing is written here; exports happen once the whole run has succeeded.

use log::{info, warn};

use crate::domain::{RunConfig, SampleTable, SweepTable};
use crate::error::AppError;
use crate::io::table::{ParseOptions, load_sample_table};

/// All computed outputs of a single `dcurve sweep` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: SampleTable,
    pub sweep: SweepTable,
}

/// Execute the full pipeline: parse the input file, then sweep.
pub fn run_sweep(config: &RunConfig) -> Result<RunOutput, AppError> {
    config.sweep.validate()?;

    // 1) Parse and validate the parameter table.
    let options = ParseOptions {
        strict_numbers: config.strict_numbers,
    };
    let table = load_sample_table(&config.input, options)?;
    info!("parsed {} samples from {}", table.len(), config.input.display());

    Ok(run_sweep_with_table(config, table))
}

/// Execute the sweep for an already parsed table.
///
/// The sweep bounds are expected to be validated already (see `run_sweep`).
pub fn run_sweep_with_table(config: &RunConfig, table: SampleTable) -> RunOutput {
    if table.is_empty() {
        warn!("input has no samples; the output will only hold the concentration column");
    }

    // 2) Evaluate every sample at every concentration.
    let sweep = crate::sweep::evaluate(&table, &config.sweep);

    RunOutput { table, sweep }
}
