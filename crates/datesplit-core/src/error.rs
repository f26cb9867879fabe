//! Error types for date splitting.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::SplitMode;

/// Broad classification used by the top-level handler to pick an exit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operating system failure (missing file, permissions, disk full).
    Io,
    /// Bad input data or configuration. The run is aborted.
    Data,
}

/// Errors that can occur while reading, splitting, or writing rows.
#[derive(Debug, Error)]
pub enum SplitError {
    // === File System Errors ===
    /// Input file could not be opened.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// CSV reader or writer failure.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A header row was expected but the file has no records.
    #[error("no header row found in {path}")]
    MissingHeader { path: PathBuf },

    // === Row Errors ===
    // Line and column numbers below are 1-indexed, counting data lines only.
    /// Neither a date nor a recognizable date expression.
    #[error("line {line}: could not parse date '{value}' in column {column}")]
    UnparseableDate {
        line: usize,
        column: usize,
        value: String,
    },

    /// Row is narrower than a configured column.
    #[error("line {line}: column {column} not present (row has {width} fields)")]
    MissingColumn {
        line: usize,
        column: usize,
        width: usize,
    },

    /// End date falls before start date.
    #[error("line {line}: end date {end} is before start date {start}")]
    EndBeforeStart {
        line: usize,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    // === Configuration Errors ===
    /// Split mode is declared but has no implementation.
    #[error("{0} splitting is not implemented")]
    UnsupportedMode(SplitMode),

    /// Column numbers are 1-indexed.
    #[error("invalid {name} column {value}: column numbers start at 1")]
    InvalidColumn { name: &'static str, value: usize },

    /// Fiscal year end must look like `MM/DD`.
    #[error("invalid fiscal year end '{value}': expected MM/DD")]
    InvalidFiscalYearEnd { value: String },
}

impl SplitError {
    /// Classify this error for exit handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileOpen { .. } | Self::FileWrite { .. } => ErrorKind::Io,
            Self::Csv { source, .. } if source.is_io_error() => ErrorKind::Io,
            _ => ErrorKind::Data,
        }
    }

    /// Returns true for operating system failures.
    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Io
    }
}

/// Result type for splitting operations.
pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitError::UnparseableDate {
            line: 3,
            column: 2,
            value: "soon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 3: could not parse date 'soon' in column 2"
        );
    }

    #[test]
    fn test_error_kind() {
        let io = SplitError::FileOpen {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(io.is_io());

        let data = SplitError::UnsupportedMode(SplitMode::Week);
        assert_eq!(data.kind(), ErrorKind::Data);
        assert_eq!(data.to_string(), "week splitting is not implemented");
    }
}
