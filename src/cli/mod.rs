//! Command-line parsing for the dose-response sweep generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the parser/sweep code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_MAX_CONC, DEFAULT_MIN_CONC};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dcurve", version, about = "Dose-response curve generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read sample parameters and write the response matrix for the concentration sweep.
    Sweep(SweepArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Options for a sweep run.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    /// Tab-separated parameter table (`name`, `ymin`, `ymax`, `EC50`).
    #[arg(short = 'i', long, value_name = "TSV")]
    pub input: PathBuf,

    /// Output file base name; `.txt` is appended. Defaults to `out.txt`.
    #[arg(short = 'o', long = "out-name", value_name = "NAME")]
    pub out_name: Option<String>,

    /// Lowest swept concentration.
    #[arg(long, default_value_t = DEFAULT_MIN_CONC)]
    pub min_conc: f64,

    /// Upper concentration bound (not emitted).
    #[arg(long, default_value_t = DEFAULT_MAX_CONC)]
    pub max_conc: f64,

    /// Reject numeric fields that are not entirely a valid number
    /// (by default they are read up to the first invalid position, like `strtod`).
    #[arg(long)]
    pub strict_numbers: bool,

    /// Also export the sweep (parameters + grid) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Render an ASCII plot of the curves in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Do not print the run summary.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `dcurve sweep --export-json`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
