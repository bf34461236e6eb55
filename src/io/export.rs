//! Export the response matrix as TSV.
//!
//! Layout:
//!
//! ```text
//! conc<TAB><name 1><TAB><name 2>...
//! <log10(c)><TAB><response 1><TAB><response 2>...
//! ```
//!
//! Numbers are written with 6 decimals.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{info, warn};

use crate::domain::{SampleTable, SweepTable};
use crate::error::{AppError, EXIT_IO};

/// Write the matrix to any writer.
pub fn write_matrix<W: Write>(out: &mut W, table: &SampleTable, sweep: &SweepTable) -> std::io::Result<()> {
    write!(out, "conc")?;
    for name in table.names() {
        write!(out, "\t{name}")?;
    }
    writeln!(out)?;

    for point in &sweep.points {
        write!(out, "{:.6}", point.log10_conc())?;
        for r in &point.responses {
            write!(out, "\t{r:.6}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Write the matrix to `path`.
///
/// The file is removed again if writing fails part-way, so a failed run never
/// leaves a truncated matrix behind.
pub fn write_matrix_file(path: &Path, table: &SampleTable, sweep: &SweepTable) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create output '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    let result = write_matrix(&mut writer, table, sweep)
        .and_then(|()| writer.flush())
        .and_then(|()| writer.get_ref().sync_all());
    drop(writer);

    if let Err(e) = result {
        if let Err(rm) = fs::remove_file(path) {
            warn!("could not remove partial output '{}': {rm}", path.display());
        }
        return Err(AppError::new(
            EXIT_IO,
            format!("Failed to write output '{}': {e}", path.display()),
        ));
    }

    info!("wrote {} rows to {}", sweep.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SampleRecord, SweepConfig};
    use crate::sweep::evaluate;

    fn table() -> SampleTable {
        SampleTable {
            samples: vec![
                SampleRecord {
                    name: "S1".to_string(),
                    ymin: 0.0,
                    ymax: 1.0,
                    ec50: 0.00001,
                },
                SampleRecord {
                    name: "S2".to_string(),
                    ymin: 0.1,
                    ymax: 0.9,
                    ec50: 0.001,
                },
            ],
        }
    }

    #[test]
    fn matrix_layout() {
        let table = table();
        let sweep = evaluate(&table, &SweepConfig::default());

        let mut buf = Vec::new();
        write_matrix(&mut buf, &table, &sweep).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 360);
        assert_eq!(lines[0], "conc\tS1\tS2");
        assert_eq!(lines[1], "-6.000000\t0.090909\t0.100799");
        assert!(text.ends_with('\n'));
        for line in &lines[1..] {
            assert_eq!(line.split('\t').count(), 3);
        }
    }

    #[test]
    fn empty_table_writes_concentration_column_only() {
        let table = SampleTable::default();
        let sweep = evaluate(&table, &SweepConfig::default());

        let mut buf = Vec::new();
        write_matrix(&mut buf, &table, &sweep).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("conc\n-6.000000\n-5.958607\n"));
    }

    #[test]
    fn write_matrix_file_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let table = table();
        let sweep = evaluate(&table, &SweepConfig::default());

        write_matrix_file(&path, &table, &sweep).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("conc\tS1\tS2\n"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let table = table();
        let sweep = evaluate(&table, &SweepConfig::default());

        let err = write_matrix_file(&path, &table, &sweep).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
        assert!(!path.exists());
    }
}
