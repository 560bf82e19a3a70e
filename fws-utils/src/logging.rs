//! Logging setup for fws tools
//!
//! Every tool logs to stderr. A log file under [`paths::log_dir`] (or an
//! explicit path) can be added alongside it, which keeps a record of long
//! inspection runs without redirecting stderr.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::{paths, FwsError, LoggingConfig, Result};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FWS_LOG";

/// File name used when a log file is requested without a path
pub const LOG_FILE_NAME: &str = "fws.log";

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    /// Stderr plus an appended, uncolored copy in the given file
    Both(PathBuf),
}

impl LogOutput {
    /// Stderr plus `fws.log` in the state log directory
    pub fn default_file() -> Self {
        LogOutput::Both(paths::log_dir().join(LOG_FILE_NAME))
    }

    pub fn log_file(&self) -> Option<&Path> {
        match self {
            LogOutput::Stderr => None,
            LogOutput::Both(path) => Some(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub output: LogOutput,
    /// Filter directives, e.g. "info" or "fws_protocol=trace,warn"
    pub filter: String,
    /// Emit span enter/exit events on stderr
    pub span_events: bool,
    pub file_line: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "info".into(),
            span_events: false,
            file_line: false,
        }
    }
}

impl LogConfig {
    /// Quiet stderr logging for command-line tools, `$FWS_LOG` overrides
    pub fn client() -> Self {
        Self {
            filter: std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".into()),
            ..Self::default()
        }
    }

    /// Debug-level stderr logging with spans and source locations
    pub fn development() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "debug".into(),
            span_events: true,
            file_line: true,
        }
    }

    /// Take the filter from a configuration file unless `$FWS_LOG` is set
    pub fn with_file_config(mut self, logging: &LoggingConfig) -> Self {
        if std::env::var_os(LOG_ENV).is_none() {
            self.filter = logging.filter.clone();
        }
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }
}

/// Install the global subscriber described by `config`
///
/// Fails on an unparsable filter, an unwritable log file, or when a
/// subscriber is already installed.
pub fn init_logging_with_config(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| FwsError::config(format!("Invalid log filter: {}", e)))?;

    let span_events = if config.span_events {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(span_events)
        .with_file(config.file_line)
        .with_line_number(config.file_line);

    let file_layer = match config.output.log_file() {
        Some(path) => Some(
            fmt::layer()
                .with_writer(open_log_file(path)?)
                .with_ansi(false)
                .with_target(true),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| FwsError::internal(format!("Failed to init logging: {}", e)))?;

    if let Some(path) = config.output.log_file() {
        tracing::debug!("logging to {}", path.display());
    }
    Ok(())
}

/// Open `path` for appending, creating its parent directory first
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        paths::ensure_dir(dir).map_err(|e| FwsError::FileWrite {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FwsError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
}
