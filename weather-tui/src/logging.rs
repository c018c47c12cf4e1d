//! File-based logging.
//!
//! The widget takes over the terminal, so tracing output goes to a daily
//! rotated file in the platform data directory instead of stderr.

use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "weather";
const DEFAULT_FILTER: &str = "weather_core=debug,weather_tui=debug,warn";

pub fn log_dir() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "weather-widget", "weather")
        .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;
    Ok(dirs.data_local_dir().join("logs"))
}

/// Initialize the logging system.
///
/// Logs are written to `weather.YYYY-MM-DD` under [`log_dir`]. `RUST_LOG`
/// overrides the default filter. Keep the returned guard alive until exit so
/// buffered lines get flushed.
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(dir = %dir.display(), "Logging initialized");

    Ok(guard)
}
