//! Environment-driven `tracing` subscriber setup.
//!
//! | Variable          | Meaning                                          |
//! |-------------------|--------------------------------------------------|
//! | `ARCO_TRACE`      | filter directive used when no level is passed    |
//! | `ARCO_LOG_FORMAT` | `pretty` (default) or `json`                     |
//! | `ARCO_LOG_FILE`   | also append events to this file, without colors |

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber.
#[derive(Debug)]
pub enum LoggingError {
    InvalidFilter { directive: String, reason: String },
    InvalidFormat(String),
    OpenLogFile { path: String, source: io::Error },
    Init(String),
}

impl LoggingError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter { .. } => "LOG_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOG_INVALID_FORMAT",
            LoggingError::OpenLogFile { .. } => "LOG_FILE_OPEN_FAILED",
            LoggingError::Init(_) => "LOG_INIT_FAILED",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter { directive, reason } => write!(
                f,
                "[{}] Invalid log filter '{}': {}",
                self.code(),
                directive,
                reason
            ),
            LoggingError::InvalidFormat(value) => write!(
                f,
                "[{}] Invalid ARCO_LOG_FORMAT '{}' (expected 'json' or 'pretty')",
                self.code(),
                value
            ),
            LoggingError::OpenLogFile { path, source } => write!(
                f,
                "[{}] Failed to open log file {}: {}",
                self.code(),
                path,
                source
            ),
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::OpenLogFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Output format of every installed layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse a format name, ignoring ASCII case.
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat(value.to_string()))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the filter for `level`, where `off` (any case) silences everything.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter {
        directive: level.to_string(),
        reason: err.to_string(),
    })
}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenLogFile {
            path: path.to_string(),
            source,
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Enable structured logging for Arco.
///
/// When `level` is `None`, this reads `ARCO_TRACE` if set, and defaults to
/// `off` otherwise. Returns `Ok(true)` when logging is initialized and
/// `Ok(false)` if a global subscriber is already configured.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("ARCO_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level_value)?;

    let format = match env::var("ARCO_LOG_FORMAT") {
        Ok(value) => LogFormat::parse(&value)?,
        Err(_) => LogFormat::default(),
    };
    let log_file = env::var("ARCO_LOG_FILE").ok();

    match format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = &log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(path)?)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = &log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(path)?)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
    }

    tracing::debug!(
        component = "logging",
        operation = "enable_logging",
        status = "success",
        level = %level_value,
        format = %format,
        file = log_file.as_deref().unwrap_or(""),
        "Logging initialized"
    );
    Ok(true)
}
