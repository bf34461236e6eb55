//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a sweep:
//! - sweep bounds
//! - the sample parameters the curves were generated from
//! - the computed grid (`log10(c)` and one response column per sample)
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::domain::{CurveFile, CurveGrid, SampleTable, SweepConfig, SweepTable};
use crate::error::{AppError, EXIT_FORMAT, EXIT_IO};

/// Build the portable curve representation of a computed sweep.
pub fn curve_file(table: &SampleTable, sweep: &SweepTable, config: &SweepConfig) -> CurveFile {
    let log10_conc = sweep.points.iter().map(|p| p.log10_conc()).collect();
    let responses = (0..table.len())
        .map(|i| sweep.points.iter().map(|p| p.responses[i]).collect())
        .collect();

    CurveFile {
        tool: "dcurve".to_string(),
        min_conc: config.min_conc,
        max_conc: config.max_conc,
        samples: table.samples.clone(),
        grid: CurveGrid {
            log10_conc,
            responses,
        },
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, curve)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write curve JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write curve JSON: {e}")))?;

    info!("wrote curve JSON to {}", path.display());
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(EXIT_FORMAT, format!("Invalid curve JSON: {e}")))?;

    if curve.grid.responses.len() != curve.samples.len() {
        return Err(AppError::new(
            EXIT_FORMAT,
            "Invalid curve JSON: expected one response column per sample.",
        ));
    }
    if curve
        .grid
        .responses
        .iter()
        .any(|ys| ys.len() != curve.grid.log10_conc.len())
    {
        return Err(AppError::new(
            EXIT_FORMAT,
            "Invalid curve JSON: response columns and concentration grid differ in length.",
        ));
    }

    Ok(curve)
}
