use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// `~/.cache/cine_discover/logs`, or a relative `logs/` when there is no cache dir.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("cine_discover").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Sends tracing output to a daily rolling file; the terminal belongs to the UI.
/// Keep the returned guard alive for the whole run so buffered lines are flushed.
pub fn init_tracing() -> Result<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "cine_discover.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
