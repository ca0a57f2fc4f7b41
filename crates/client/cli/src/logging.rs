//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so logs only ever go to a per-session
//! file under the platform cache directory.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "client.log";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn setup_logging(session_id: Option<&str>) -> Result<WorkerGuard> {
    let session_id = session_id
        .map(str::to_owned)
        .unwrap_or_else(generated_session_id);

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!(
        "log file: {}",
        session_log_dir.join(LOG_FILE).display()
    );

    Ok(guard)
}

/// Platform cache directory for session logs.
///
/// - macOS: `~/Library/Caches/swipe-deck/logs`
/// - Linux: `~/.cache/swipe-deck/logs` (or `$XDG_CACHE_HOME/swipe-deck/logs`)
/// - Windows: `%LOCALAPPDATA%\swipe-deck\cache\logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "swipe-deck")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("swipe-deck"))
        .join("logs")
}

fn generated_session_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{secs}")
}
