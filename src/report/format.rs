//! Formatted terminal output.
//!
//! We keep formatting code in one place so output changes are localized.

use crate::domain::{RunConfig, SampleTable, SweepTable};
use crate::report::compute_stats;

/// Format the run summary (inputs, per-sample parameters, sweep extent).
pub fn format_run_summary(table: &SampleTable, sweep: &SweepTable, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== dcurve - dose-response sweep ===\n");
    out.push_str(&format!("Input: {}\n", config.input.display()));
    out.push_str(&format!("Samples: n={}\n", table.len()));

    let stats = compute_stats(sweep);
    match &stats {
        Some(stats) => out.push_str(&format!(
            "Sweep: n={} | conc=[{:.3e}, {:.3e}] | log10=[{:.3}, {:.3}]\n",
            stats.n_points,
            stats.conc_min,
            stats.conc_max,
            stats.conc_min.log10(),
            stats.conc_max.log10(),
        )),
        None => out.push_str("Sweep: n=0\n"),
    }
    out.push_str(&format!("Output: {}\n", config.output.display()));

    if table.is_empty() {
        return out;
    }

    out.push('\n');
    out.push_str(
        format!(
            "{:<24} {:>12} {:>12} {:>12} {:>8} {:>21}\n",
            "name", "ymin", "ymax", "EC50", "log10", "response range"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<24} {:-<12} {:-<12} {:-<12} {:-<8} {:-<21}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (idx, s) in table.samples.iter().enumerate() {
        let range = stats
            .as_ref()
            .and_then(|st| st.response_ranges.get(idx))
            .map(|(lo, hi)| format!("[{lo:.4}, {hi:.4}]"))
            .unwrap_or_default();
        out.push_str(
            format!(
                "{:<24} {:>12.6} {:>12.6} {:>12.3e} {:>8.3} {:>21}\n",
                truncate(&s.name, 24),
                s.ymin,
                s.ymax,
                s.ec50,
                s.ec50.log10(),
                range,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::{SampleRecord, SweepConfig};
    use crate::sweep::evaluate;

    fn config() -> RunConfig {
        RunConfig {
            input: PathBuf::from("params.tsv"),
            output: PathBuf::from("out.txt"),
            sweep: SweepConfig::default(),
            strict_numbers: false,
            export_json: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            quiet: false,
        }
    }

    #[test]
    fn summary_lists_samples_and_sweep() {
        let table = SampleTable {
            samples: vec![SampleRecord {
                name: "S1".to_string(),
                ymin: 0.0,
                ymax: 1.0,
                ec50: 1e-5,
            }],
        };
        let sweep = evaluate(&table, &SweepConfig::default());
        let txt = format_run_summary(&table, &sweep, &config());

        assert!(txt.contains("Input: params.tsv\n"));
        assert!(txt.contains("Samples: n=1\n"));
        assert!(txt.contains("Sweep: n=360 | conc=[1.000e-6, 9.900e-3] | log10=[-6.000, -2.004]\n"));
        assert!(txt.contains("Output: out.txt\n"));

        let row = txt.lines().find(|l| l.starts_with("S1")).unwrap();
        assert!(row.contains("1.000e-5"));
        assert!(row.contains("-5.000"));
        assert!(row.contains("[0.0909, 0.9990]"));
    }

    #[test]
    fn empty_table_has_no_sample_section() {
        let table = SampleTable::default();
        let sweep = evaluate(&table, &SweepConfig::default());
        let txt = format_run_summary(&table, &sweep, &config());

        assert!(txt.contains("Samples: n=0\n"));
        assert!(!txt.contains("name"));
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd.");
    }
}
