//! Logger setup for the analyzer binary.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use thiserror::Error;

pub const DEFAULT_LOG_FILE: &str = "analyzer.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogDestination {
    /// Write to the configured log file.
    #[default]
    File,
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Most verbose level that still gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LogLevel,
    pub file: PathBuf,
}

#[derive(Debug, Error)]
#[error("could not create log file {path:?}: {source}")]
pub struct LogFileError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Installs the global logger.
///
/// A log file that cannot be created never leaves the app without a logger:
/// output falls back to the terminal and the error is handed back so the
/// caller can log it through the logger just installed.
pub fn initialize(settings: &LogSettings) -> Result<(), LogFileError> {
    let (loggers, file_error) = build_loggers(settings);
    let _ = CombinedLogger::init(loggers);
    file_error.map_or(Ok(()), Err)
}

fn build_loggers(settings: &LogSettings) -> (Vec<Box<dyn SharedLogger>>, Option<LogFileError>) {
    let level = settings.level.filter();
    let config = build_config();

    let wants_file = matches!(
        settings.destination,
        LogDestination::File | LogDestination::Both
    );
    let mut wants_terminal = matches!(
        settings.destination,
        LogDestination::Terminal | LogDestination::Both
    );

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let mut file_error = None;
    if wants_file {
        match open_log_file(&settings.file) {
            Ok(file) => loggers.push(WriteLogger::new(level, config.clone(), file)),
            Err(err) => {
                file_error = Some(err);
                wants_terminal = true;
            }
        }
    }
    if wants_terminal {
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    (loggers, file_error)
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // Only the workspace's own crates; reqwest/hyper internals are noise.
        .add_filter_allow_str("analyzer")
        .build()
}

fn open_log_file(path: &Path) -> Result<File, LogFileError> {
    File::create(path).map_err(|source| LogFileError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(destination: LogDestination, file: PathBuf) -> LogSettings {
        LogSettings {
            destination,
            level: LogLevel::Debug,
            file,
        }
    }

    #[test]
    fn both_destinations_get_one_logger_each() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (loggers, error) =
            build_loggers(&settings(LogDestination::Both, dir.path().join("a.log")));

        assert_eq!(loggers.len(), 2);
        assert!(error.is_none());
        assert!(dir.path().join("a.log").exists());
    }

    #[test]
    fn terminal_only_never_touches_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (loggers, error) =
            build_loggers(&settings(LogDestination::Terminal, dir.path().join("a.log")));

        assert_eq!(loggers.len(), 1);
        assert!(error.is_none());
        assert!(!dir.path().join("a.log").exists());
    }

    #[test]
    fn unwritable_file_falls_back_to_the_terminal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing_parent = dir.path().join("no-such-dir").join("a.log");

        let (loggers, error) = build_loggers(&settings(LogDestination::File, missing_parent));

        assert_eq!(loggers.len(), 1);
        let error = error.expect("file error");
        assert!(error.to_string().starts_with("could not create log file"));
    }

    #[test]
    fn levels_map_onto_filters() {
        assert_eq!(LogLevel::default().filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Trace.filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Error.filter(), LevelFilter::Error);
    }
}
