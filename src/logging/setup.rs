use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;
use crate::error::{DatasetError, Result};

/// Install the global subscriber: bracketed output to stdout and to a
/// timestamped file under `log_dir`.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
///
/// # Returns
/// * `Ok(path)` of the log file that was created
/// * `Err(DatasetError::Logging)` if a global subscriber is already installed
pub fn setup_logging(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("segmentation_dataset_{}.log", timestamp));

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    let file_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| DatasetError::Logging(e.to_string()))?;

    info!("Log file created at: {:?}", log_path);

    Ok(log_path)
}
