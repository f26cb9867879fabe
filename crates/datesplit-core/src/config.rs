//! Immutable run configuration for the splitter.
//!
//! Column numbers are accepted 1-indexed (the way users count spreadsheet
//! columns) and stored 0-indexed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{Result, SplitError};
use crate::model::SplitMode;

/// Custom fiscal year end as month and day.
///
/// Accepted for compatibility; the splitter does not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalYearEnd {
    pub month: u32,
    pub day: u32,
}

impl Default for FiscalYearEnd {
    fn default() -> Self {
        Self { month: 12, day: 30 }
    }
}

impl FromStr for FiscalYearEnd {
    type Err = SplitError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || SplitError::InvalidFiscalYearEnd {
            value: value.to_string(),
        };
        let (month, day) = value.trim().split_once('/').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;
        // 2000 is a leap year, so 02/29 is accepted.
        NaiveDate::from_ymd_opt(2000, month, day).ok_or_else(invalid)?;
        Ok(Self { month, day })
    }
}

impl fmt::Display for FiscalYearEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

/// Settings that drive one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub mode: SplitMode,
    /// 0-indexed identifier column; `None` uses the line number.
    pub id_column: Option<usize>,
    /// 0-indexed start date column.
    pub start_column: usize,
    /// 0-indexed end date column.
    pub end_column: usize,
    pub has_header: bool,
    /// Caller reports run progress; log output is filtered by the subscriber.
    pub verbose: bool,
    pub fiscal_year_end: FiscalYearEnd,
}

impl SplitConfig {
    /// Create a configuration from 1-indexed start and end column numbers.
    pub fn new(start_column: usize, end_column: usize) -> Result<Self> {
        Ok(Self {
            mode: SplitMode::default(),
            id_column: None,
            start_column: to_zero_based("start", start_column)?,
            end_column: to_zero_based("end", end_column)?,
            has_header: true,
            verbose: false,
            fiscal_year_end: FiscalYearEnd::default(),
        })
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SplitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the 1-indexed identifier column (0 means use the line number).
    #[must_use]
    pub fn with_id_column(mut self, column: usize) -> Self {
        self.id_column = column.checked_sub(1);
        self
    }

    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_fiscal_year_end(mut self, fiscal_year_end: FiscalYearEnd) -> Self {
        self.fiscal_year_end = fiscal_year_end;
        self
    }

    /// Reject settings the splitter cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !self.mode.is_supported() {
            return Err(SplitError::UnsupportedMode(self.mode));
        }
        Ok(())
    }
}

fn to_zero_based(name: &'static str, value: usize) -> Result<usize> {
    value
        .checked_sub(1)
        .ok_or(SplitError::InvalidColumn { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_converts_columns() {
        let config = SplitConfig::new(2, 3).unwrap();
        assert_eq!(config.start_column, 1);
        assert_eq!(config.end_column, 2);
        assert_eq!(config.id_column, None);
        assert_eq!(config.mode, SplitMode::Month);
        assert!(config.has_header);
    }

    #[test]
    fn test_zero_column_rejected() {
        let err = SplitConfig::new(0, 3).unwrap_err();
        assert!(matches!(
            err,
            SplitError::InvalidColumn {
                name: "start",
                value: 0
            }
        ));
    }

    #[test]
    fn test_id_column_zero_uses_line_number() {
        let config = SplitConfig::new(1, 2).unwrap().with_id_column(0);
        assert_eq!(config.id_column, None);
        let config = config.with_id_column(4);
        assert_eq!(config.id_column, Some(3));
    }

    #[test]
    fn test_week_mode_fails_validation() {
        let config = SplitConfig::new(1, 2).unwrap().with_mode(SplitMode::Week);
        assert!(matches!(
            config.validate(),
            Err(SplitError::UnsupportedMode(SplitMode::Week))
        ));
    }

    #[test]
    fn test_fiscal_year_end_parse() {
        assert_eq!(
            "06/30".parse::<FiscalYearEnd>().unwrap(),
            FiscalYearEnd { month: 6, day: 30 }
        );
        assert_eq!("2/29".parse::<FiscalYearEnd>().unwrap().to_string(), "02/29");
        assert!("13/01".parse::<FiscalYearEnd>().is_err());
        assert!("04/31".parse::<FiscalYearEnd>().is_err());
        assert!("june".parse::<FiscalYearEnd>().is_err());
    }
}
