//! Tracing setup
//!
//! The terminal belongs to the TUI, so events go to `gin-admin.log` in the
//! data directory through a non-blocking appender. Without a data directory
//! logging is discarded.

use crate::config::project_dirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "gin_admin=info";
const LOG_FILE_NAME: &str = "gin-admin.log";

/// Directory holding the log file, if a data directory is available
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Subscriber writing to `LOG_FILE_NAME` in `dir`
fn file_subscriber(
    dir: &Path,
    filter: EnvFilter,
) -> (impl Subscriber + Send + Sync + 'static, WorkerGuard) {
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(non_blocking);

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);
    (subscriber, guard)
}

/// Install the global subscriber. Filter comes from `RUST_LOG`.
///
/// The returned guard flushes pending events when dropped; keep it alive
/// for the whole run.
pub fn init_logging() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (subscriber, guard) = file_subscriber(&dir, filter);
    subscriber.try_init().ok()?;

    Some(guard)
}
