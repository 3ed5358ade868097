mod settings;

pub use settings::{Config, DashboardSettings};

use crate::error::{DashboardError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.invoice-dashboard/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invoice-dashboard") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invoice-dashboard"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load config.toml (defaults if missing)
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DashboardError::ConfigParse { path, source: e })
}

/// Resolve the records file: an explicit override wins, then the configured
/// path. Relative configured paths are taken from the config directory.
pub fn resolve_records_path(
    settings: &DashboardSettings,
    config_dir: &Path,
    override_path: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }
    let configured = settings
        .records_file
        .as_deref()
        .ok_or(DashboardError::NoRecordsPath)?;
    let path = expand_path(configured);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(config_dir.join(path))
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[dashboard]
records_file = "records.json"  # relative to this directory, or absolute / ~/...
currency_symbol = "$"
page_size = 15
"#;
