//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-slo/`
//! - macOS: `~/Library/Application Support/gh-slo/`
//! - Windows: `%APPDATA%\gh-slo\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "gh-slo";

/// Get the application config directory
///
/// The directory is not created; gh-slo never writes to it.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
