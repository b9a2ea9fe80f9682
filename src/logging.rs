//! Logging system initialization
//!
//! Release builds have no console, so logs go to
//! `%APPDATA%\AudioWidget\audio-widget.log`. Level defaults to INFO and can
//! be set with `RUST_LOG`.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE: &str = "audio-widget.log";

/// Install the global subscriber writing to `log_dir`. Keep the returned
/// guard alive for the lifetime of the process so buffered lines get flushed.
pub fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = fmt()
        .with_writer(writer)
        .with_env_filter(default_filter())
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!("Audio Widget v{} started", env!("CARGO_PKG_VERSION"));
    Ok(guard)
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
