//! File logging bootstrap.
//!
//! The terminal belongs to the TUI, so diagnostics go to rotating log files
//! under the user data directory. Initialization happens once per process;
//! later calls are no-ops.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

const LOG_FILE_BASENAME: &str = "odontogram";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Default log directory under the user data directory
pub fn default_log_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Could not find data directory")?;
    Ok(data_dir.join("odontogram").join("logs"))
}

/// Start file logging at `level` (a log specification such as "info" or
/// "odontogram::chart=debug"). `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let handle = Logger::try_with_env_or_str(level)
        .with_context(|| format!("Invalid log level: {level}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("Failed to start logger")?;

    // A concurrent init may have won; its handle stays active either way
    let _ = LOGGER.set(handle);

    log::info!(
        "logging started version={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(())
}

/// Flush buffered log lines; call before the process exits
pub fn flush_logging() {
    if let Some(handle) = LOGGER.get() {
        handle.flush();
    }
}
