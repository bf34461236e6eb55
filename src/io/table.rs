//! Strict TSV ingest for the sample parameter table.
//!
//! The accepted format is deliberately narrow:
//!
//! ```text
//! name<TAB>ymin<TAB>ymax<TAB>EC50
//! <name><TAB><float><TAB><float><TAB><float>
//! ```
//!
//! Rules:
//! - exactly 4 tab-separated fields per line, no quoting, no trimming
//! - every line ends with `\n` (an optional `\r` right before it is accepted)
//! - a line holds at most `MAX_LINE` bytes including its newline
//! - a field holds at most `MAX_FIELD` bytes; longer fields are rejected, never truncated
//! - numeric fields only contain `0-9 . - e E`
//! - an empty line ends the table
//!
//! The first violation aborts the whole parse; there is no row-level recovery.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::domain::{EXPECTED_HEADERS, MAX_SAMPLES, SampleRecord, SampleTable};
use crate::error::{AppError, EXIT_IO};

/// Maximum line length in bytes, newline included.
pub const MAX_LINE: usize = 4096;

/// Maximum field length in bytes.
pub const MAX_FIELD: usize = 127;

const FIELD_COUNT: usize = EXPECTED_HEADERS.len();

/// Coarse classification of a `TableError`, used to pick the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableErrorKind {
    Io,
    Validation,
    Capacity,
}

/// Everything that can go wrong while reading the sample table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("line {line}: read failed: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("input is empty, expected the header line `name\\tymin\\tymax\\tEC50`")]
    MissingHeader,

    #[error("line {line}: line is longer than {max} bytes")]
    LineTooLong { line: usize, max: usize },

    #[error("line {line}: last line in file is not terminated by a newline")]
    UnterminatedLine { line: usize },

    #[error("line {line}: unexpected null byte")]
    NullByte { line: usize },

    #[error("line {line}: unexpected content after carriage return")]
    TrailingContent { line: usize },

    #[error("line {line}: expected {expected} fields (name, ymin, ymax, EC50), found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: column `{column}` is {len} bytes long, the maximum is {max}")]
    FieldTooLong {
        line: usize,
        column: &'static str,
        len: usize,
        max: usize,
    },

    #[error("line 1: column {position} header `{found}` doesn't match expected header `{expected}`")]
    HeaderMismatch {
        position: usize,
        found: String,
        expected: &'static str,
    },

    #[error("line {line}: numerical column `{column}` contains invalid character '{}'", .ch.escape_default())]
    InvalidCharacter {
        line: usize,
        column: &'static str,
        ch: char,
    },

    #[error("line {line}: column `{column}` value `{value}` is not a valid number")]
    MalformedNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: column `{column}` value `{value}` is not finite")]
    NonFiniteValue {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: EC50 must not be negative (got {value})")]
    NegativeEc50 { line: usize, value: f64 },

    #[error("line {line}: data follows the blank line {blank}")]
    ContentAfterBlankLine { line: usize, blank: usize },

    #[error("line {line}: too many samples, at most {max} are supported")]
    TooManySamples { line: usize, max: usize },
}

impl TableError {
    pub fn kind(&self) -> TableErrorKind {
        match self {
            TableError::Io { .. } => TableErrorKind::Io,
            TableError::TooManySamples { .. } => TableErrorKind::Capacity,
            _ => TableErrorKind::Validation,
        }
    }
}

/// Parser knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject numeric fields that are not entirely a valid literal.
    ///
    /// When off, such fields decode to their longest valid prefix (`0.0` if
    /// there is none), the way C's `strtod` reads them.
    pub strict_numbers: bool,
}

/// Open `path` and parse it as a sample table.
pub fn load_sample_table(path: &Path, options: ParseOptions) -> Result<SampleTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_IO,
            format!("Failed to open input '{}': {e}", path.display()),
        )
    })?;

    Ok(parse_table(BufReader::new(file), options)?)
}

/// Parse a complete sample table from `reader`.
pub fn parse_table<R: BufRead>(reader: R, options: ParseOptions) -> Result<SampleTable, TableError> {
    let mut lines = LineReader::new(reader);

    let header = lines.next_line()?.ok_or(TableError::MissingHeader)?;
    validate_header(&header)?;

    let mut samples = Vec::new();
    let mut blank_line = None;

    while let Some(line) = lines.next_line()? {
        if record_bytes(&line)?.is_empty() {
            if blank_line.is_none() {
                blank_line = Some(line.number);
            }
            continue;
        }
        if let Some(blank) = blank_line {
            return Err(TableError::ContentAfterBlankLine {
                line: line.number,
                blank,
            });
        }
        if samples.len() == MAX_SAMPLES {
            return Err(TableError::TooManySamples {
                line: line.number,
                max: MAX_SAMPLES,
            });
        }

        let record = parse_record(&line, options)?;
        debug!(
            "line {}: sample `{}` ymin={} ymax={} EC50={}",
            line.number, record.name, record.ymin, record.ymax, record.ec50
        );
        samples.push(record);
    }

    Ok(SampleTable { samples })
}

/// One line of input with its terminating newline removed.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub number: usize,
    pub bytes: &'a [u8],
}

/// Reads newline-terminated lines into a reused buffer.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(MAX_LINE),
            line_no: 0,
        }
    }

    /// Next line, or `None` when the input is exhausted at a line start.
    pub fn next_line(&mut self) -> Result<Option<Line<'_>>, TableError> {
        self.buf.clear();
        let number = self.line_no + 1;

        let n = self
            .inner
            .by_ref()
            .take(MAX_LINE as u64)
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| TableError::Io { line: number, source })?;
        if n == 0 {
            return Ok(None);
        }
        self.line_no = number;

        if self.buf.contains(&0) {
            return Err(TableError::NullByte { line: number });
        }
        if self.buf.last() != Some(&b'\n') {
            if n == MAX_LINE {
                return Err(TableError::LineTooLong {
                    line: number,
                    max: MAX_LINE,
                });
            }
            return Err(TableError::UnterminatedLine { line: number });
        }
        self.buf.pop();

        Ok(Some(Line {
            number,
            bytes: &self.buf,
        }))
    }
}

/// The part of a line that holds fields: everything before a closing `\r`.
fn record_bytes<'a>(line: &Line<'a>) -> Result<&'a [u8], TableError> {
    match line.bytes.iter().position(|&b| b == b'\r') {
        Some(pos) if pos + 1 == line.bytes.len() => Ok(&line.bytes[..pos]),
        Some(_) => Err(TableError::TrailingContent { line: line.number }),
        None => Ok(line.bytes),
    }
}

/// Split a line into its tab-separated fields.
pub fn split_fields<'a>(line: &Line<'a>) -> Result<Vec<&'a [u8]>, TableError> {
    Ok(record_bytes(line)?.split(|&b| b == b'\t').collect())
}

fn validate_header(line: &Line<'_>) -> Result<(), TableError> {
    let fields = split_fields(line)?;

    for (idx, (found, expected)) in fields.iter().zip(EXPECTED_HEADERS).enumerate() {
        if *found != expected.as_bytes() {
            return Err(TableError::HeaderMismatch {
                position: idx + 1,
                found: String::from_utf8_lossy(found).into_owned(),
                expected,
            });
        }
    }

    if fields.len() != FIELD_COUNT {
        return Err(TableError::FieldCount {
            line: line.number,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    Ok(())
}

fn parse_record(line: &Line<'_>, options: ParseOptions) -> Result<SampleRecord, TableError> {
    let fields = split_fields(line)?;
    if fields.len() != FIELD_COUNT {
        return Err(TableError::FieldCount {
            line: line.number,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    for (field, column) in fields.iter().zip(EXPECTED_HEADERS) {
        if field.len() > MAX_FIELD {
            return Err(TableError::FieldTooLong {
                line: line.number,
                column,
                len: field.len(),
                max: MAX_FIELD,
            });
        }
    }

    let name = String::from_utf8_lossy(fields[0]).into_owned();
    let ymin = decode_number(fields[1], EXPECTED_HEADERS[1], line.number, options)?;
    let ymax = decode_number(fields[2], EXPECTED_HEADERS[2], line.number, options)?;
    let ec50 = decode_number(fields[3], EXPECTED_HEADERS[3], line.number, options)?;

    if ec50 < 0.0 {
        return Err(TableError::NegativeEc50 {
            line: line.number,
            value: ec50,
        });
    }

    Ok(SampleRecord {
        name,
        ymin,
        ymax,
        ec50,
    })
}

fn is_numeric_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'e' | b'E')
}

fn decode_number(
    field: &[u8],
    column: &'static str,
    line: usize,
    options: ParseOptions,
) -> Result<f64, TableError> {
    if let Some(&b) = field.iter().find(|&&b| !is_numeric_byte(b)) {
        return Err(TableError::InvalidCharacter {
            line,
            column,
            ch: char::from(b),
        });
    }

    // Only ASCII is left after the character check.
    let text: String = field.iter().map(|&b| char::from(b)).collect();

    let value = match text.parse::<f64>() {
        Ok(v) => v,
        Err(_) if options.strict_numbers => {
            return Err(TableError::MalformedNumber {
                line,
                column,
                value: text,
            });
        }
        Err(_) => {
            let v = leading_f64(&text);
            warn!("line {line}: column `{column}` value `{text}` is not a complete number, read as {v}");
            v
        }
    };

    if !value.is_finite() {
        return Err(TableError::NonFiniteValue {
            line,
            column,
            value: text,
        });
    }

    Ok(value)
}

/// Value of the longest prefix of `text` that is a float literal, else `0.0`.
fn leading_f64(text: &str) -> f64 {
    (1..=text.len())
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}
