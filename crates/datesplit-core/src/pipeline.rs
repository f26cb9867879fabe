//! Row-level orchestration: resolve ids, parse dates, split, collect.
//!
//! The whole table is processed before anything is returned, so a single
//! bad row aborts the run without partial output.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::config::SplitConfig;
use crate::dates::DateParser;
use crate::error::{Result, SplitError};
use crate::model::{InputRow, InputTable, OutputRecord};
use crate::split::split;

/// Columns prepended to every output row.
pub const OUTPUT_PREFIX_COLUMNS: [&str; 4] = ["ICN", "StartDate", "EndDate", "Days"];

/// Everything needed to write the result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutput {
    pub header: Option<Vec<String>>,
    pub records: Vec<OutputRecord>,
    /// Number of source data rows processed.
    pub rows: usize,
}

/// Output header for `source`, or `None` when the input has no header row.
pub fn output_header(source: Option<&[String]>, config: &SplitConfig) -> Option<Vec<String>> {
    if !config.has_header {
        return None;
    }
    let mut header: Vec<String> = OUTPUT_PREFIX_COLUMNS
        .iter()
        .map(|name| (*name).to_string())
        .collect();
    header.extend(source.unwrap_or_default().iter().cloned());
    Some(header)
}

/// Split every row of `table` in input order.
pub fn split_table(
    table: &InputTable,
    config: &SplitConfig,
    parser: &dyn DateParser,
) -> Result<SplitOutput> {
    config.validate()?;

    let mut records = Vec::new();
    for row in &table.rows {
        debug!(record = row.line + 1, "splitting record");
        let row_records = split_row(row, config, parser)?;
        for record in &row_records {
            trace!(
                sub_id = %record.sub_id,
                start = %record.start,
                end = %record.end,
                days = record.days,
                "emitted record"
            );
        }
        records.extend(row_records);
    }

    Ok(SplitOutput {
        header: output_header(table.header.as_deref(), config),
        records,
        rows: table.rows.len(),
    })
}

/// Split a single row into its output records.
pub fn split_row(
    row: &InputRow,
    config: &SplitConfig,
    parser: &dyn DateParser,
) -> Result<Vec<OutputRecord>> {
    let id = match config.id_column {
        Some(column) => {
            let id = required_field(row, column)?;
            debug!(id, "splitting id");
            id.to_string()
        }
        None => {
            debug!(line = row.line, "splitting line");
            row.line.to_string()
        }
    };

    let start = parse_date(row, config.start_column, parser)?;
    let end = parse_date(row, config.end_column, parser)?;
    if end < start {
        return Err(SplitError::EndBeforeStart {
            line: row.line + 1,
            start,
            end,
        });
    }

    Ok(split(&id, start, end, config.mode, &row.fields))
}

fn required_field(row: &InputRow, column: usize) -> Result<&str> {
    row.field(column).ok_or(SplitError::MissingColumn {
        line: row.line + 1,
        column: column + 1,
        width: row.fields.len(),
    })
}

fn parse_date(row: &InputRow, column: usize, parser: &dyn DateParser) -> Result<NaiveDate> {
    let value = required_field(row, column)?;
    parser
        .parse(value)
        .ok_or_else(|| SplitError::UnparseableDate {
            line: row.line + 1,
            column: column + 1,
            value: value.to_string(),
        })
}
