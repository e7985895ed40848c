//! Configuration for gh-slo
//!
//! This crate provides:
//! - Config file lookup (CWD, home directory, XDG config directory)
//! - Application configuration (AppConfig) with per-tier SLO thresholds

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::{find_config_file, load_config_file};
pub use paths::{app_config_path, config_dir};
