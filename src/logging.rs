//! Tracing subscriber setup
//!
//! Logs go to stderr and to a daily `deadlock_translator.<date>.log` in the
//! game directory; only the newest two files are kept. `RUST_LOG` takes
//! precedence over the configured level.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Result, fs as fs_error};

pub const LOG_PREFIX: &str = "deadlock_translator";
pub const LOG_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 2;

/// Build the env filter: `RUST_LOG` if set and valid, otherwise `level`
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init(log_dir: &Path, level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .map_err(|e| fs_error::write_failed(log_dir.display().to_string(), e))?;

    let file_appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .map_err(|e| fs_error::write_failed(log_dir.display().to_string(), e))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    // A second init in the same process (tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
