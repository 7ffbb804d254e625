use std::path::Path;

use anyhow::{Context, anyhow};
use tracing_appender::non_blocking::WorkerGuard;

fn level(verbose: bool) -> tracing::Level {
    if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

/// Sends logs to `path`, since the terminal itself is busy drawing the maze.
///
/// The returned guard flushes the background writer when dropped, so keep it alive
/// until the program exits.
pub fn init_file_logging(path: &Path, verbose: bool) -> anyhow::Result<WorkerGuard> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level(verbose))
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))?;
    Ok(guard)
}

/// Sends logs to stderr, for headless runs.
pub fn init_stderr_logging(verbose: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level(verbose))
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}
