//! Logging setup for the command-line driver.
//!
//! Installs a global tracing subscriber that appends every event allowed by
//! `RUST_LOG` (default `info`) to `<log_dir>/runtime.log` and echoes warnings
//! and errors to stderr. The library itself only emits events.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime, UtcOffset};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter, Registry};

/// File every run appends to.
pub const LOG_FILE_NAME: &str = "runtime.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create or access the log directory.
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    /// Failed to format a timestamp.
    #[error("Failed to format time: {0}")]
    FormatTime(#[from] time::error::Format),
}

/// Initialize tracing to append to `<log_dir>/runtime.log`.
///
/// Subsequent calls are no-ops. Returns the log file path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or another global
/// subscriber is already installed.
pub fn init(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    let log_path = log_dir.join(LOG_FILE_NAME);
    if LOG_GUARD.get().is_some() {
        return Ok(log_path);
    }

    fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_appender = rolling::never(log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let timer = build_timer();
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_timer(timer.clone())
        .with_writer(file_writer)
        .with_filter(build_env_filter());
    let stderr_layer = fmt::layer()
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::WARN);

    let subscriber = Registry::default().with(file_layer).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(log_path)
}

/// Identifier of one run, e.g. `2024-05-01_13-45-00`.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_run_id(now: OffsetDateTime) -> Result<String, LoggingError> {
    const RUN_ID_FORMAT: &[BorrowedFormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(now.format(RUN_ID_FORMAT)?)
}

/// Current local time, or UTC when the local offset is unavailable.
#[must_use]
pub fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn build_timer() -> fmt::time::OffsetTime<BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_has_timestamp_layout() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("valid timestamp");
        assert_eq!(
            format_run_id(fixed).expect("format"),
            "2023-11-14_22-13-20"
        );
    }

    #[test]
    fn now_is_after_fixed_point() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("valid timestamp");
        assert!(now_local_or_utc() > fixed);
    }
}
