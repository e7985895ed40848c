use std::{
    env,
    path::{Path, PathBuf},
};

const CONFIG_FILE: &str = ".gh-slo.toml";

/// Locate the config file
///
/// Searches, in order:
/// 1. `.gh-slo.toml` in the current working directory
/// 2. `.gh-slo.toml` in the home directory
/// 3. `config.toml` in the XDG config directory (see [`crate::paths`])
pub fn find_config_file() -> Option<PathBuf> {
    let cwd = env::current_dir().ok();
    let home = env::var_os("HOME").map(PathBuf::from);
    let xdg = crate::paths::app_config_path().ok();

    find_config_file_in(cwd.as_deref(), home.as_deref(), xdg)
}

/// First existing file among the candidate locations
fn find_config_file_in(
    cwd: Option<&Path>,
    home: Option<&Path>,
    xdg: Option<PathBuf>,
) -> Option<PathBuf> {
    let candidates = [
        cwd.map(|dir| dir.join(CONFIG_FILE)),
        home.map(|dir| dir.join(CONFIG_FILE)),
        xdg,
    ];

    candidates.into_iter().flatten().find(|path| path.is_file())
}

/// Load config file content from the first location that has one
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let path = find_config_file()?;
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(e) => {
            log::warn!("Failed to read config file {}: {}", path.display(), e);
            None
        }
    }
}
