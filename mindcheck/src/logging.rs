//! File-backed tracing setup.
//!
//! The terminal is the UI surface, so log lines go to a file through a
//! non-blocking `tracing-appender` writer. The returned guard flushes the
//! writer on drop and must live until the end of `main`.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to `path`.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
///
/// # Errors
///
/// Returns `Err` if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(path: &Path) -> io::Result<WorkerGuard> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(guard)
}
