//! CLI argument definitions for datesplit.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use datesplit_core::{FiscalYearEnd, SplitMode};

/// Default export location, relative to the working directory.
pub const DEFAULT_EXPORT: &str = "./splitDateResult.csv";

#[derive(Parser)]
#[command(
    name = "datesplit",
    version,
    about = "Split dated CSV into rows defined by a date mode.",
    long_about = "Split dated CSV into rows defined by a date mode.\n\n\
                  Each input row is expanded into one output row per day, month, or year\n\
                  covered by its start and end dates. Output rows are prefixed with\n\
                  ICN, StartDate, EndDate and Days columns."
)]
pub struct Cli {
    #[command(flatten)]
    pub split: SplitArgs,

    /// Adjust log verbosity (-v for progress, -vv for each record, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SplitArgs {
    /// Column number of the start date (1-indexed).
    #[arg(value_name = "START")]
    pub start: usize,

    /// Column number of the end date (1-indexed).
    #[arg(value_name = "END")]
    pub end: usize,

    /// Input file to be broken out.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Custom fiscal year end as MM/DD (accepted but not applied yet).
    #[arg(short = 'f', long = "fiscal", value_name = "MM/DD", default_value = "12/30")]
    pub fiscal: FiscalYearEnd,

    /// First row of the source is data, not a header.
    #[arg(long = "noheader")]
    pub no_header: bool,

    /// Leave out the original columns (not implemented yet).
    #[arg(long = "nocruft")]
    pub no_cruft: bool,

    /// Column number of the row identifier (1-indexed; 0 uses the line number).
    #[arg(short = 'i', long = "id", value_name = "COL", default_value_t = 0)]
    pub id: usize,

    /// Where to write the result.
    #[arg(short = 'e', long = "export", value_name = "PATH", default_value = DEFAULT_EXPORT)]
    pub export: PathBuf,
}

/// Mutually exclusive split granularity flags.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(multiple = false)]
pub struct ModeArgs {
    /// Split daily.
    #[arg(long)]
    pub day: bool,

    /// Split weekly (not implemented yet).
    #[arg(long)]
    pub week: bool,

    /// Split monthly (default).
    #[arg(long)]
    pub month: bool,

    /// Split yearly.
    #[arg(long)]
    pub year: bool,
}

impl ModeArgs {
    pub fn split_mode(self) -> SplitMode {
        if self.day {
            SplitMode::Day
        } else if self.year {
            SplitMode::Year
        } else if self.week {
            SplitMode::Week
        } else {
            SplitMode::Month
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["datesplit", "2", "3", "in.csv"]).unwrap();
        assert_eq!(cli.split.start, 2);
        assert_eq!(cli.split.end, 3);
        assert_eq!(cli.split.mode.split_mode(), SplitMode::Month);
        assert_eq!(cli.split.id, 0);
        assert_eq!(cli.split.export, PathBuf::from(DEFAULT_EXPORT));
        assert_eq!(cli.split.fiscal, FiscalYearEnd::default());
        assert!(!cli.split.no_header);
        assert!(!cli.log_timestamps);
    }

    #[test]
    fn test_log_flags() {
        let cli = Cli::try_parse_from([
            "datesplit",
            "--log-timestamps",
            "--log-format",
            "json",
            "--log-level",
            "trace",
            "1",
            "2",
            "in.csv",
        ])
        .unwrap();
        assert!(cli.log_timestamps);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Trace)));
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "datesplit", "-v", "--year", "-i", "1", "-e", "out.csv", "-f", "06/30", "2", "3",
            "in.csv",
        ])
        .unwrap();
        assert!(cli.verbosity.is_present());
        assert_eq!(cli.split.mode.split_mode(), SplitMode::Year);
        assert_eq!(cli.split.id, 1);
        assert_eq!(cli.split.export, PathBuf::from("out.csv"));
        assert_eq!(cli.split.fiscal, FiscalYearEnd { month: 6, day: 30 });
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["datesplit", "--day", "--month", "1", "2", "in.csv"]).is_err());
    }

    #[test]
    fn test_bad_fiscal_rejected() {
        assert!(Cli::try_parse_from(["datesplit", "-f", "99/99", "1", "2", "in.csv"]).is_err());
    }
}
