//! Row and segment types shared by the splitter and the CSV layer.

use std::fmt;

use chrono::NaiveDate;

/// Granularity at which a date range is decomposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SplitMode {
    /// One segment per calendar day.
    Day,
    /// Declared for CLI compatibility; not implemented.
    Week,
    /// One segment per calendar month.
    #[default]
    Month,
    /// One segment per calendar year.
    Year,
}

impl SplitMode {
    /// Returns the lowercase mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Whether the splitter can decompose ranges in this mode.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Week)
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One data line from the source CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// 0-indexed data line number (header excluded).
    pub line: usize,
    /// Raw field values in source order.
    pub fields: Vec<String>,
}

impl InputRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Field at a 0-indexed column.
    pub fn field(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Parsed source file: optional header plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<InputRow>,
}

/// Contiguous inclusive sub-range of a row's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Zero-based position in emission order.
    pub index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Segment {
    /// Inclusive day count of the segment.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A single output line: one segment of one source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub sub_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
    pub original: Vec<String>,
}

impl OutputRecord {
    /// Build a record for `segment`, deriving `{id}_{index}` and the day count.
    pub fn from_segment(id: &str, segment: Segment, original: Vec<String>) -> Self {
        Self {
            sub_id: format!("{id}_{}", segment.index),
            start: segment.start,
            end: segment.end,
            days: segment.days(),
            original,
        }
    }

    /// Fields in output column order.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(4 + self.original.len());
        fields.push(self.sub_id.clone());
        fields.push(self.start.format("%Y-%m-%d").to_string());
        fields.push(self.end.format("%Y-%m-%d").to_string());
        fields.push(self.days.to_string());
        fields.extend(self.original.iter().cloned());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_segment_days_inclusive() {
        let segment = Segment {
            index: 0,
            start: date(2023, 2, 1),
            end: date(2023, 2, 28),
        };
        assert_eq!(segment.days(), 28);
    }

    #[test]
    fn test_output_record_fields() {
        let segment = Segment {
            index: 2,
            start: date(2023, 3, 1),
            end: date(2023, 3, 10),
        };
        let record = OutputRecord::from_segment("A17", segment, vec!["x".into(), "y".into()]);
        assert_eq!(
            record.to_fields(),
            vec!["A17_2", "2023-03-01", "2023-03-10", "10", "x", "y"]
        );
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(SplitMode::default(), SplitMode::Month);
        assert_eq!(SplitMode::Year.to_string(), "year");
        assert!(!SplitMode::Week.is_supported());
    }
}
