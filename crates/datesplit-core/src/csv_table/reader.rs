//! Source CSV loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::model::{InputRow, InputTable};

/// Read a source CSV from disk.
///
/// With `has_header`, the first record becomes the table header and data
/// line numbering starts at the record after it.
pub fn read_input_table(path: &Path, has_header: bool) -> Result<InputTable> {
    let file = File::open(path).map_err(|source| SplitError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    read_input_from(file, path, has_header)
}

/// Read a source CSV from any reader; `path` is only used in errors.
pub fn read_input_from<R: Read>(reader: R, path: &Path, has_header: bool) -> Result<InputTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header = None;
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| SplitError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        if idx == 0
            && let Some(first) = fields.first_mut()
            && let Some(stripped) = first.strip_prefix('\u{feff}')
        {
            *first = stripped.to_string();
        }

        if has_header && header.is_none() {
            header = Some(fields);
        } else {
            rows.push(InputRow::new(rows.len(), fields));
        }
    }

    if has_header && header.is_none() {
        return Err(SplitError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        rows = rows.len(),
        has_header,
        "read source csv"
    );
    Ok(InputTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(contents: &str, has_header: bool) -> Result<InputTable> {
        read_input_from(contents.as_bytes(), Path::new("test.csv"), has_header)
    }

    #[test]
    fn test_reads_header_and_rows() {
        let table = read("id,start,end\nA,2023-01-01,2023-01-05\n", true).unwrap();
        assert_eq!(
            table.header,
            Some(vec!["id".to_string(), "start".into(), "end".into()])
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].line, 0);
        assert_eq!(table.rows[0].field(0), Some("A"));
    }

    #[test]
    fn test_without_header_first_line_is_data() {
        let table = read("A,1/1/2023,1/2/2023\nB,1/3/2023,1/4/2023\n", false).unwrap();
        assert!(table.header.is_none());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].line, 1);
    }

    #[test]
    fn test_strips_utf8_bom() {
        let table = read("\u{feff}id,start\nA,B\n", true).unwrap();
        assert_eq!(table.header.unwrap()[0], "id");
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let table = read("a,b,c\n1,2\n1,2,3,4\n", true).unwrap();
        assert_eq!(table.rows[0].fields.len(), 2);
        assert_eq!(table.rows[1].fields.len(), 4);
    }

    #[test]
    fn test_empty_file_with_header_expected() {
        let err = read("", true).unwrap_err();
        assert!(matches!(err, SplitError::MissingHeader { .. }));
    }
}
