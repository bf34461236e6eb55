//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments
//! - parses the parameter table and runs the sweep
//! - writes the response matrix and optional exports
//! - prints the summary/plot

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::cli::{Command, PlotArgs, SweepArgs};
use crate::domain::{RunConfig, SweepConfig};
use crate::error::AppError;

pub mod pipeline;

/// Output file used when no `--out-name` is given.
pub const DEFAULT_OUTPUT: &str = "out.txt";

/// Entry point for the `dcurve` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    // We want `dcurve -i params.tsv` to behave like `dcurve sweep -i params.tsv`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Sweep(args) => handle_sweep(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// `RUST_LOG` (optionally from a `.env` file) controls verbosity; default is `warn`.
fn init_logging() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    execute_sweep(&config)?;
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);

    println!("{plot}");
    Ok(())
}

/// Run the pipeline and write every requested output.
///
/// Outputs are only created after the input parsed and the sweep completed,
/// so a malformed table never leaves a file behind.
pub fn execute_sweep(config: &RunConfig) -> Result<pipeline::RunOutput, AppError> {
    let run = pipeline::run_sweep(config)?;

    crate::io::export::write_matrix_file(&config.output, &run.table, &run.sweep)?;

    if let Some(path) = &config.export_json {
        let curve = crate::io::curve::curve_file(&run.table, &run.sweep, &config.sweep);
        crate::io::curve::write_curve_json(path, &curve)?;
    }

    if !config.quiet {
        println!(
            "{}",
            crate::report::format_run_summary(&run.table, &run.sweep, config)
        );
    }
    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.table,
            &run.sweep,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    info!("done: {} samples x {} concentrations", run.table.len(), run.sweep.len());
    Ok(run)
}

pub fn run_config_from_args(args: &SweepArgs) -> RunConfig {
    RunConfig {
        input: args.input.clone(),
        output: output_path(args.out_name.as_deref()),
        sweep: SweepConfig {
            min_conc: args.min_conc,
            max_conc: args.max_conc,
            ..SweepConfig::default()
        },
        strict_numbers: args.strict_numbers,
        export_json: args.export_json.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        quiet: args.quiet,
    }
}

/// `out.txt` by default, otherwise the given base name with `.txt` appended.
pub fn output_path(out_name: Option<&str>) -> PathBuf {
    match out_name {
        Some(name) => PathBuf::from(format!("{name}.txt")),
        None => PathBuf::from(DEFAULT_OUTPUT),
    }
}

/// Rewrite argv so flags without a subcommand default to `sweep`.
///
/// Rules:
/// - `dcurve -i in.tsv ...`        -> `dcurve sweep -i in.tsv ...`
/// - `dcurve --help/--version/-h`  -> unchanged (show top-level help/version)
/// - `dcurve sweep|plot|help ...`  -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "sweep" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "sweep flags".
    if arg1.starts_with('-') {
        argv.insert(1, "sweep".to_string());
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use crate::error::{EXIT_CAPACITY, EXIT_FORMAT, EXIT_IO};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn config(dir: &Path, input: &str) -> RunConfig {
        let input_path = dir.join("params.tsv");
        fs::write(&input_path, input).unwrap();
        RunConfig {
            input: input_path,
            output: dir.join("out.txt"),
            sweep: SweepConfig::default(),
            strict_numbers: false,
            export_json: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            quiet: true,
        }
    }

    #[test]
    fn rewrite_args_defaults_to_sweep() {
        assert_eq!(
            rewrite_args(argv(&["dcurve", "-i", "in.tsv"])),
            argv(&["dcurve", "sweep", "-i", "in.tsv"])
        );
        assert_eq!(
            rewrite_args(argv(&["dcurve", "--input", "in.tsv", "-o", "x"])),
            argv(&["dcurve", "sweep", "--input", "in.tsv", "-o", "x"])
        );
        assert_eq!(rewrite_args(argv(&["dcurve", "--help"])), argv(&["dcurve", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["dcurve", "plot", "--curve", "c.json"])),
            argv(&["dcurve", "plot", "--curve", "c.json"])
        );
        assert_eq!(rewrite_args(argv(&["dcurve"])), argv(&["dcurve"]));
    }

    #[test]
    fn output_name_gets_txt_suffix() {
        assert_eq!(output_path(None), PathBuf::from("out.txt"));
        assert_eq!(output_path(Some("curves")), PathBuf::from("curves.txt"));
        assert_eq!(output_path(Some("run.v2")), PathBuf::from("run.v2.txt"));
    }

    #[test]
    fn config_from_args_keeps_precision() {
        let cli = crate::cli::Cli::try_parse_from(["dcurve", "sweep", "-i", "a.tsv", "--max-conc", "0.1"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep command");
        };
        let config = run_config_from_args(&args);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.sweep.max_conc, 0.1);
        assert_eq!(config.sweep.precision, SweepConfig::default().precision);
    }

    #[test]
    fn end_to_end_single_sample() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "name\tymin\tymax\tEC50\nS1\t0.0\t1.0\t0.00001\n");

        let run = execute_sweep(&config).unwrap();
        assert_eq!(run.sweep.len(), 360);

        let text = fs::read_to_string(&config.output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 361);
        assert_eq!(lines[0], "conc\tS1");
        assert_eq!(lines[1], "-6.000000\t0.090909");
        assert_eq!(lines[91], "-5.000000\t0.500000");
    }

    #[test]
    fn missing_field_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "name\tymin\tymax\tEC50\nS2\t0.0\t1.0\n");

        let err = execute_sweep(&config).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_FORMAT);
        assert!(err.message().contains("expected 4 fields"));
        assert!(!config.output.exists());
    }

    #[test]
    fn too_many_samples_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut input = "name\tymin\tymax\tEC50\n".to_string();
        for i in 0..33 {
            input.push_str(&format!("S{i}\t0\t1\t1e-5\n"));
        }
        let config = config(dir.path(), &input);

        let err = execute_sweep(&config).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CAPACITY);
        assert!(!config.output.exists());
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), "");
        config.input = dir.path().join("nope.tsv");

        let err = execute_sweep(&config).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
        assert!(!config.output.exists());
    }

    #[test]
    fn invalid_bounds_fail_before_reading_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), "not even a header\n");
        config.sweep.max_conc = config.sweep.min_conc / 2.0;

        let err = execute_sweep(&config).unwrap_err();
        assert!(err.message().starts_with("Invalid concentration range"));
    }

    #[test]
    fn json_export_is_written_alongside() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), "name\tymin\tymax\tEC50\nA\t0\t1\t1e-4\nB\t1\t0\t1e-3\n");
        let json_path = dir.path().join("curve.json");
        config.export_json = Some(json_path.clone());

        execute_sweep(&config).unwrap();
        let curve = crate::io::curve::read_curve_json(&json_path).unwrap();
        assert_eq!(curve.samples.len(), 2);
        assert_eq!(curve.grid.responses.len(), 2);
        assert_eq!(curve.grid.log10_conc.len(), 360);
    }
}
