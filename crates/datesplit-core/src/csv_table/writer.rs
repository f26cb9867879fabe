//! Result CSV writing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::model::OutputRecord;

/// Create (or truncate) `path` and write the header and records to it.
pub fn write_output(
    path: &Path,
    header: Option<&[String]>,
    records: &[OutputRecord],
) -> Result<()> {
    let file = File::create(path).map_err(|source| SplitError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_output_to(file, path, header, records)
}

/// Write output rows with `\n` line endings and minimal quoting.
pub fn write_output_to<W: Write>(
    writer: W,
    path: &Path,
    header: Option<&[String]>,
    records: &[OutputRecord],
) -> Result<()> {
    let csv_error = |source: csv::Error| SplitError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    if let Some(header) = header {
        writer.write_record(header).map_err(csv_error)?;
    }
    for record in records {
        writer.write_record(record.to_fields()).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| SplitError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), records = records.len(), "wrote output csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_minimal_quoting_and_unix_newlines() {
        let record = OutputRecord {
            sub_id: "7_0".to_string(),
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
            days: 31,
            original: vec!["Smith, J".to_string(), "plain".to_string()],
        };
        let header = vec!["ICN".to_string(), "Name".to_string()];
        let mut buffer = Vec::new();
        write_output_to(
            &mut buffer,
            Path::new("out.csv"),
            Some(header.as_slice()),
            &[record],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "ICN,Name\n7_0,2023-01-01,2023-01-31,31,\"Smith, J\",plain\n"
        );
    }

    #[test]
    fn test_no_header() {
        let mut buffer = Vec::new();
        write_output_to(&mut buffer, Path::new("out.csv"), None, &[]).unwrap();
        assert!(buffer.is_empty());
    }
}
