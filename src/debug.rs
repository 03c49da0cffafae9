// Debug logging for termpong
// File-based tracing output, enabled with --debug. The TUI owns the terminal,
// so nothing is ever logged to stdout/stderr while the game runs.

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "termpong=debug";

/// Default log location: `<temp dir>/termpong-debug.log`
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("termpong-debug.log")
}

/// Install the global tracing subscriber.
///
/// # Behavior
/// - If `enabled` is false nothing is installed and every `tracing` macro
///   is a no-op
/// - Otherwise the log file is created/truncated and events go there
/// - `RUST_LOG` overrides the default `termpong=debug` filter
///
/// Returns the path being written to, if any.
pub fn init(enabled: bool, path: Option<&Path>) -> Result<Option<PathBuf>> {
    if !enabled {
        return Ok(None);
    }

    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))?;

    tracing::info!("termpong debug log started, follow with: tail -f {}", path.display());
    Ok(Some(path))
}
