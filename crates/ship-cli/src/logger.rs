use crate::{CliError, CliResult};

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, debug};

/// Where log lines are written.
///
/// Never stdout: command results are printed there as JSON or tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr { colored: bool },
    File(PathBuf),
}

impl LogSink {
    pub fn new(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => LogSink::File(path),
            None => LogSink::Stderr { colored },
        }
    }
}

/// Install the global fern logger. Fails if one is already installed.
#[track_caller]
pub fn initialize(level: ship_config::LogLevel, sink: LogSink) -> CliResult<()> {
    let level = level.0;

    let output = match &sink {
        LogSink::File(path) => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, true))
            .chain(open_log_file(path)?),
        LogSink::Stderr { colored: true } => {
            let colors = level_colors();
            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {}",
                        humantime::format_rfc3339_seconds(SystemTime::now()),
                        colors.color(record.level()),
                        message,
                    ))
                })
                .chain(std::io::stderr())
        }
        LogSink::Stderr { colored: false } => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, false))
            .chain(std::io::stderr()),
    };

    Dispatch::new()
        .level(level)
        // Connection pool chatter drowns out session events at debug.
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
        .chain(output)
        .apply()
        .map_err(|e| CliError::logger(format!("Failed to initialize logger: {e}")))?;

    debug!("Logger initialized: level={level}, sink={sink:?}");
    Ok(())
}

fn write_line(out: FormatCallback, message: &std::fmt::Arguments, record: &Record, verbose: bool) {
    if verbose {
        // Files get sub-second timestamps and the emitting module.
        out.finish(format_args!(
            "[{} - {}] {} [{}]",
            humantime::format_rfc3339(SystemTime::now()),
            record.level(),
            message,
            record.target(),
        ))
    } else {
        out.finish(format_args!(
            "[{} - {}] {}",
            humantime::format_rfc3339_seconds(SystemTime::now()),
            record.level(),
            message,
        ))
    }
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

#[track_caller]
fn open_log_file(path: &Path) -> CliResult<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::logger(format!("Failed to open log file {}: {e}", path.display())))
}
