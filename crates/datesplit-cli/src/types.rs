use std::path::PathBuf;
use std::time::Duration;

use datesplit_core::SplitMode;

/// Outcome of a successful split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub input: PathBuf,
    pub export: PathBuf,
    pub mode: SplitMode,
    /// Source data rows read (header excluded).
    pub rows: usize,
    /// Output rows written (header excluded).
    pub records: usize,
    pub elapsed: Duration,
}
