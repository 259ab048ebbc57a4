//! Diagnostics for raid-roster
//!
//! Everything goes to stderr; stdout is reserved for tables and confirmations.
//! A daily rolling log file can be added from `[logging]`, and `RUST_LOG`
//! still narrows or widens individual modules.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingSettings;
use crate::error::{Error, Result};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Keeps the log file writer flushing until dropped at the end of `main`.
pub struct LogGuards {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber for a planner command.
pub fn init_logging(
    settings: &LoggingSettings,
    color: bool,
    verbose: u8,
    quiet: bool,
) -> Result<LogGuards> {
    let level = effective_level(&settings.level, verbose, quiet);

    let mut file_guard = None;
    let file_layer = match settings.file.as_deref() {
        Some(log_file) => {
            let appender = rolling_appender(Path::new(log_file), settings.max_files)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(fmt_layer(writer, settings.json_format, false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(crate_filter(level)?)
        .with(fmt_layer(io::stderr, settings.json_format, color))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(%level, file = ?settings.file, "Logging ready");

    Ok(LogGuards {
        _file_guard: file_guard,
    })
}

/// Stderr-only logging for `config` subcommands, which run without a config.
pub fn init_simple(level: Level) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(fmt_layer(io::stderr, false, true))
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize logging: {}", e)))
}

/// `-q` silences all but errors; each `-v` steps past the configured level.
fn effective_level(configured: &str, verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => configured.parse().unwrap_or(Level::WARN),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` sets the baseline; this crate always logs at `level`.
fn crate_filter(level: Level) -> Result<EnvFilter> {
    let directive: Directive = format!("raid_roster={}", level)
        .to_lowercase()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid log directive: {}", e)))?;

    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()))
        .add_directive(directive))
}

fn fmt_layer<S, W>(writer: W, json: bool, ansi: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_writer(writer)
            .with_target(false)
            .with_ansi(ansi)
            .boxed()
    }
}

/// Daily files named after the configured path's stem, e.g. `roster.2026-01-01.log`.
fn rolling_appender(path: &Path, keep: u32) -> Result<RollingFileAppender> {
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory).map_err(|e| Error::IoWrite {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let prefix = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("raid-roster");

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(keep.max(1) as usize)
        .build(directory)
        .map_err(|e| Error::Config(format!("Cannot open log file in {}: {}", directory.display(), e)))
}
