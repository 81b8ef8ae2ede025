//! Configuration management for drawline-migrate
//!
//! Optional settings live in ~/.drawline-migrate/config.toml. The file is
//! read if present and never created implicitly.

use crate::migration::DEFAULT_TARGET;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound for context lines, on the command line and in the config file
pub const MAX_CONTEXT_LINES: usize = 10;

/// drawline-migrate configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rewrite settings
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Dry-run output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Debug logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// File rewritten when no path is given on the command line
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Context lines around changes in --dry-run output
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write a debug log for every run
    #[serde(default)]
    pub debug: bool,
}

// Default functions for serde
fn default_target() -> String { DEFAULT_TARGET.to_string() }
fn default_context_lines() -> usize { 2 }

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    Ok(home_dir.join(".drawline-migrate").join("config.toml"))
}

/// Load configuration from the default location, falling back to defaults
/// when there is no config file (or no home directory)
pub fn load_config() -> Result<Config> {
    match config_file_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => Ok(Config::default()),
    }
}

/// Load and validate configuration from `path`
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.rewrite.target.trim().is_empty() {
        anyhow::bail!("Invalid target: must not be empty");
    }

    if config.output.context_lines > MAX_CONTEXT_LINES {
        anyhow::bail!(
            "Invalid context_lines: {} (max {})",
            config.output.context_lines,
            MAX_CONTEXT_LINES
        );
    }

    Ok(())
}

/// Render the effective configuration as TOML
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}
