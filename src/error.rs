//! Top-level error type.
//!
//! Every failure ends up as an `AppError`: a human-readable message plus the
//! process exit code `main` reports it with.
//!
//! Exit codes:
//! - `2`: I/O and configuration problems (files, sweep bounds)
//! - `3`: malformed input table
//! - `4`: input exceeds a capacity limit

use crate::io::table::{TableError, TableErrorKind};

pub const EXIT_IO: u8 = 2;
pub const EXIT_FORMAT: u8 = 3;
pub const EXIT_CAPACITY: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        let exit_code = match err.kind() {
            TableErrorKind::Io => EXIT_IO,
            TableErrorKind::Validation => EXIT_FORMAT,
            TableErrorKind::Capacity => EXIT_CAPACITY,
        };
        AppError::new(exit_code, format!("Invalid input table: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_errors_map_to_exit_codes() {
        let capacity: AppError = TableError::TooManySamples { line: 34, max: 32 }.into();
        assert_eq!(capacity.exit_code(), EXIT_CAPACITY);

        let format: AppError = TableError::MissingHeader.into();
        assert_eq!(format.exit_code(), EXIT_FORMAT);
        assert!(format.message().starts_with("Invalid input table:"));
    }
}
