//! Date-range splitting for dated CSV rows.
//!
//! This crate turns each source row carrying a start and end date into one
//! output record per calendar period (day, month, or year) covered by the
//! range.
//!
//! # Features
//!
//! - **Splitting**: lazy [`segments`] iterator and the [`split`] convenience
//! - **Date parsing**: [`FlexibleDateParser`] behind the [`DateParser`] trait
//! - **CSV I/O**: flexible-width reading and minimal-quoting writing
//! - **Pipeline**: [`split_table`] processes a whole file all-or-nothing
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use datesplit_core::{FlexibleDateParser, SplitConfig, SplitMode};
//!
//! let config = SplitConfig::new(2, 3)?.with_mode(SplitMode::Month);
//! let table = datesplit_core::read_input_table(Path::new("claims.csv"), config.has_header)?;
//! let output = datesplit_core::split_table(&table, &config, &FlexibleDateParser::new())?;
//! datesplit_core::write_output(Path::new("out.csv"), output.header.as_deref(), &output.records)?;
//! ```

mod config;
mod csv_table;
mod dates;
mod error;
mod model;
mod pipeline;
mod split;

// === Error Types ===
pub use error::{ErrorKind, Result, SplitError};

// === Model ===
pub use model::{InputRow, InputTable, OutputRecord, Segment, SplitMode};

// === Configuration ===
pub use config::{FiscalYearEnd, SplitConfig};

// === Date Parsing ===
pub use dates::{DateParser, FlexibleDateParser};

// === Splitting ===
pub use split::{Segments, segments, split};

// === Pipeline ===
pub use pipeline::{OUTPUT_PREFIX_COLUMNS, SplitOutput, output_header, split_row, split_table};

// === CSV I/O ===
pub use csv_table::{read_input_from, read_input_table, write_output, write_output_to};
