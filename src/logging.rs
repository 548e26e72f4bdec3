//! Diagnostic logging setup.
//!
//! The terminal belongs to the interface, so every log line goes to a file instead.

use std::{fs, path::Path};

use color_eyre::eyre::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub(crate) const DEFAULT_FILTER: &str = "mazecarver=info";

/// Prefix of the log file name.
const LOG_FILE_PREFIX: &str = "mazecarver";

/// Builds the level filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub(crate) fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global tracing subscriber, writing to `mazecarver.log` inside `log_dir`.
///
/// # Errors
///
/// This function may return errors if:
/// - The log directory cannot be created
/// - The log file cannot be opened
/// - A global subscriber is already installed
pub fn install(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");

    Ok(())
}
