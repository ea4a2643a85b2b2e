//! Stderr logger behind the `log` facade.
//!
//! The curated build stream owns stdout, so diagnostics go to stderr. The
//! level comes from the `MVNWATCH_LOG` environment variable (`off`, `error`,
//! `warn`, `info`, `debug`, `trace`); unset means `warn`, keeping the
//! interactive output quiet unless something is off.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable controlling the log level.
pub const LEVEL_ENV: &str = "MVNWATCH_LOG";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let prefix = match record.level() {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        eprintln!("mvnwatch: {prefix}: {}", record.args());
    }

    fn flush(&self) {}
}

/// Install the logger. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = level_from_env(std::env::var(LEVEL_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(filter);
    }
}

fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(other) => {
            eprintln!("mvnwatch: warning: unknown {LEVEL_ENV} value {other:?}; using warn");
            LevelFilter::Warn
        }
        None => LevelFilter::Warn,
    }
}
