/// File-backed `tracing` setup. The TUI owns the terminal, so nothing is
/// written to stdout or stderr.
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "lifeweeks.log";

/// Returns the directory logs go to, next to the default database.
pub fn default_log_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("lifeweeks"),
        None => PathBuf::from("."),
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
/// Returns the log file path.
pub fn init(level: &str, log_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install logger: {err}"))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        "logging initialized"
    );
    Ok(path)
}
