//! Console + dated-file logging.
//!
//! Logging is decided once at startup. `Logger::from_config` returns either a
//! dispatcher that writes to stderr and `<dir>/YYYY-MM-DD.log`, or a no-op
//! dispatcher when logging is off. The caller runs its work inside
//! `Logger::scope`; nothing is installed globally.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::Dispatch;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::AppError;

/// Environment variable that overrides the default `debug` filter.
pub const LOG_FILTER_ENV: &str = "CHARGES_LOG";

const DEFAULT_DIRECTIVE: &str = "rental_charges=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from("."),
        }
    }
}

pub struct Logger {
    dispatch: Dispatch,
    file: Option<PathBuf>,
}

impl Logger {
    pub fn from_config(config: &LogConfig) -> Result<Self, AppError> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        fs::create_dir_all(&config.dir).map_err(|e| {
            AppError::usage(format!("Failed to create log dir '{}': {e}", config.dir.display()))
        })?;

        let date = Local::now().format("%Y-%m-%d").to_string();
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(date.as_str())
            .filename_suffix("log")
            .build(&config.dir)
            .map_err(|e| AppError::usage(format!("Failed to open log file: {e}")))?;

        let file_layer = fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(false)
            .with_file(true)
            .with_line_number(true);

        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(true)
            .with_line_number(true);

        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            file: Some(log_file_path(&config.dir, &date)),
        })
    }

    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
            file: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Path of the log file, when logging is on.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Run `f` with this logger receiving every event it emits.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

fn log_file_path(dir: &Path, date: &str) -> PathBuf {
    dir.join(format!("{date}.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logger_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            enabled: false,
            dir: dir.path().to_path_buf(),
        };

        let logger = Logger::from_config(&config).unwrap();
        logger.scope(|| tracing::error!("never written"));

        assert!(!logger.is_enabled());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn enabled_logger_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            enabled: true,
            dir: dir.path().join("logs"),
        };

        let logger = Logger::from_config(&config).unwrap();
        logger.scope(|| tracing::warn!("disk almost full"));

        let file = logger.file().unwrap().to_path_buf();
        let expected = format!("{}.log", Local::now().format("%Y-%m-%d"));
        assert_eq!(file.file_name().unwrap().to_str().unwrap(), expected);

        let text = fs::read_to_string(&file).unwrap();
        assert!(text.contains("WARN"));
        assert!(text.contains("logging.rs:"));
        assert!(text.contains("disk almost full"));
    }
}
