//! Debug logging support for drawline-migrate
//!
//! When debug mode is enabled (config or --debug), each run is logged to
//! ~/.drawline-migrate/drawline-migrate.log.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

const DEFAULT_FILTER: &str = "drawline_migrate=debug";

/// Initialize the debug logging system
///
/// Returns the path to the log file, or None if logging is not enabled.
pub fn init_debug_logging(debug_enabled: bool) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        return Ok(None);
    }

    match get_log_path() {
        Ok(log_path) => init_debug_logging_at(&log_path),
        Err(e) => {
            eprintln!("Warning: Debug logging disabled: {}", e);
            Ok(None)
        }
    }
}

fn open_log_file(log_path: &Path) -> Result<fs::File> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Could not create log file {}", log_path.display()))
}

fn init_debug_logging_at(log_path: &Path) -> Result<Option<PathBuf>> {
    match open_log_file(log_path) {
        Ok(log_file) => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

            let subscriber = registry()
                .with(
                    fmt::layer()
                        .with_writer(log_file)
                        .with_ansi(false)
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                )
                .with(filter);

            if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
                eprintln!("Warning: Failed to set tracing subscriber: {}", e);
                return Ok(None);
            }

            Ok(Some(log_path.to_path_buf()))
        }
        Err(e) => {
            // Logging must never block the rewrite itself
            eprintln!("Warning: {:#}", e);
            Ok(None)
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".drawline-migrate").join("drawline-migrate.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_path() {
        if let Ok(path) = get_log_path() {
            assert!(
                path.ends_with(".drawline-migrate/drawline-migrate.log"),
                "Unexpected log path: {}",
                path.display()
            );
        }
    }

    #[test]
    fn test_init_debug_logging_disabled() {
        let result = init_debug_logging(false);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), None, "Should return None when debug is disabled");
    }

    #[test]
    fn test_uncreatable_log_directory_falls_back_to_none() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let result = init_debug_logging_at(&blocker.join("sub").join("drawline-migrate.log"));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_unwritable_log_falls_back_to_none() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let result = init_debug_logging_at(temp_dir.path());
        assert_eq!(result.unwrap(), None);
    }
}
