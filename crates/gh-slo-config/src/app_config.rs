//! Application configuration
//!
//! Configuration loaded from `.gh-slo.toml`.
//!
//! ```toml
//! skip_unlabeled_repositories = true
//!
//! [thresholds]
//! triage_days = 7
//! important_days = 91
//! urgent_days = 14
//! ```

use anyhow::{Context, Result};
use gh_slo::SloThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from .gh-slo.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Deadlines per SLO tier
    #[serde(default)]
    pub thresholds: SloThresholds,

    /// Skip repositories that do not define all priority labels
    #[serde(default = "default_skip_unlabeled_repositories")]
    pub skip_unlabeled_repositories: bool,
}

fn default_skip_unlabeled_repositories() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            thresholds: SloThresholds::default(),
            skip_unlabeled_repositories: default_skip_unlabeled_repositories(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {:#}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicit path, failing if it cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        Ok(())
    }
}
