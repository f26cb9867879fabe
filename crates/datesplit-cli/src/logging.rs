//! Logging setup for the `datesplit` binary.
//!
//! # Log Levels
//!
//! - `error`: fatal run errors
//! - `warn`: accepted-but-unimplemented options (default level)
//! - `info`: run progress: file opened, split mode, export path (`-v`)
//! - `debug`: each record and id being split (`-vv`)
//! - `trace`: each emitted output record (`-vvv`)
//!
//! `RUST_LOG` takes over when neither `-v`/`-q` nor `--log-level` is given.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Crates whose events are shown at the configured level.
const LOG_TARGETS: [&str; 2] = ["datesplit_cli", "datesplit_core"];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level to emit.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    /// Prefix each line with a timestamp.
    pub with_timestamps: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Log to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// Single line per event.
    Compact,
    /// One JSON object per event, with span close events.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Whether run progress (`info`) is shown at this configuration.
    pub fn is_verbose(&self) -> bool {
        self.level_filter >= LevelFilter::INFO
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already set.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            fmt_layer(config, SharedFileWriter::new(file))
        }
        None => fmt_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(layer)
        .try_init()
        .map_err(io::Error::other)
}

/// Formatting layer for `config`, writing through `writer`.
fn fmt_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(false);

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, true) => layer
            .json()
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        (LogFormat::Json, false) => layer
            .json()
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .without_time()
            .boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => layer.boxed(),
        (LogFormat::Pretty, false) => layer.without_time().boxed(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<File>>,
}

impl SharedFileGuard {
    fn with_file<T>(&self, op: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        op(&mut *guard)
    }
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(Write::flush)
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Directive string for our crates at `level_filter`, e.g. `warn,datesplit_cli=warn,...`.
fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let mut directives = level.clone();
    for target in LOG_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Build an `EnvFilter`, letting `RUST_LOG` win only when allowed.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;
    use tracing_subscriber::Registry;

    /// Emit one event through a layer built from `config`, return what was written.
    fn render(config: &LogConfig) -> String {
        let log = NamedTempFile::new().unwrap();
        let writer = SharedFileWriter::new(log.reopen().unwrap());
        let subscriber = Registry::default().with(fmt_layer(config, writer));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(records = 3, "split done");
        });
        fs::read_to_string(log.path()).unwrap()
    }

    #[test]
    fn test_is_verbose() {
        assert!(!LogConfig::default().is_verbose());
        assert!(LogConfig::default().with_level(LevelFilter::INFO).is_verbose());
        assert!(LogConfig::default().with_level(LevelFilter::TRACE).is_verbose());
        assert!(!LogConfig::default().with_level(LevelFilter::OFF).is_verbose());
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "debug,datesplit_cli=debug,datesplit_core=debug"
        );
    }

    #[test]
    fn test_timestamps_toggle() {
        let config = LogConfig::default()
            .with_ansi(false)
            .with_format(LogFormat::Compact);

        let plain = render(&config);
        assert!(plain.contains("split done"));
        assert!(!plain.contains(':'), "unexpected timestamp in {plain:?}");

        let stamped = render(&config.with_timestamps(true));
        assert!(stamped.contains("split done"));
        assert!(stamped.contains(':'), "missing timestamp in {stamped:?}");
    }

    #[test]
    fn test_json_lines() {
        let config = LogConfig::default().with_format(LogFormat::Json);

        let plain = render(&config);
        assert!(plain.starts_with('{'));
        assert!(plain.contains("\"message\":\"split done\""));
        assert!(!plain.contains("\"timestamp\""));

        let stamped = render(&config.with_timestamps(true));
        assert!(stamped.contains("\"timestamp\""));
    }
}
