use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use datesplit_core::{
    FiscalYearEnd, FlexibleDateParser, SplitConfig, SplitError, read_input_table, split_table,
    write_output,
};

use crate::cli::SplitArgs;
use crate::types::RunSummary;

/// Exit code for runs that fail on bad data or configuration.
pub const EXIT_FAILURE: i32 = 1;

/// Map CLI arguments onto the immutable split configuration.
pub fn build_config(args: &SplitArgs, verbose: bool) -> Result<SplitConfig> {
    let config = SplitConfig::new(args.start, args.end)?
        .with_mode(args.mode.split_mode())
        .with_id_column(args.id)
        .with_header(!args.no_header)
        .with_verbose(verbose)
        .with_fiscal_year_end(args.fiscal);
    config.validate()?;
    Ok(config)
}

/// Read, split and export one file.
///
/// Nothing is written unless every row splits cleanly.
pub fn run_split(args: &SplitArgs, verbose: bool) -> Result<RunSummary> {
    let config = build_config(args, verbose).context("invalid arguments")?;
    let run_span = info_span!("run", input = %args.input.display());
    let _run_guard = run_span.enter();
    let started = Instant::now();

    warn_unimplemented(args, &config);

    info!(path = %args.input.display(), "opening file");
    let table = read_input_table(&args.input, config.has_header)?;

    info!(mode = %config.mode, "split mode");
    info!("starting date split");
    let parser = FlexibleDateParser::new();
    let output = split_table(&table, &config, &parser)?;
    info!(
        rows = output.rows,
        records = output.records.len(),
        "date split complete"
    );

    info!(path = %args.export.display(), "exporting");
    write_output(&args.export, output.header.as_deref(), &output.records)?;

    let elapsed = started.elapsed();
    info!(duration_ms = elapsed.as_millis(), "run complete");
    Ok(RunSummary {
        input: args.input.clone(),
        export: args.export.clone(),
        mode: config.mode,
        rows: output.rows,
        records: output.records.len(),
        elapsed,
    })
}

/// Report a failed run and pick the process exit code.
///
/// Operating system failures are reported on stdout and exit cleanly; any
/// other failure goes to stderr with [`EXIT_FAILURE`].
pub fn report_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<SplitError>() {
        Some(split_error) if split_error.is_io() => {
            println!("OS error: {split_error}");
            0
        }
        _ => {
            eprintln!("error: {error:#}");
            EXIT_FAILURE
        }
    }
}

fn warn_unimplemented(args: &SplitArgs, config: &SplitConfig) {
    if args.no_cruft {
        warn!("--nocruft is not implemented; original columns are still written");
    }
    if config.fiscal_year_end != FiscalYearEnd::default() {
        warn!(
            fiscal_year_end = %config.fiscal_year_end,
            "custom fiscal year end is not implemented; ignoring"
        );
    }
}
