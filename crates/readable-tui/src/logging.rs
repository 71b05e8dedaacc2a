//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout or stderr while it runs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default log directory: `<data_dir>/readable/logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("readable")
        .join("logs")
}

/// Install a daily-rolling file subscriber. `RUST_LOG` overrides `level`.
///
/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the writer thread.
pub fn init_logging(level: &str, dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "readable={level},readable_tui={level},readable_core={level},warn"
        ))
    });

    let (writer, guard) = non_blocking(rolling::daily(dir, "readable.log"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
