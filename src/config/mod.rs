pub mod settings;

pub use settings::{EventSettings, NavigationSettings, PresentationSettings, Settings};

use crate::errors::{NavError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the navstack configuration directory (~/.navstack/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| NavError::config("Could not find home directory"))?;
    Ok(home_dir.join(".navstack"))
}

/// Default location of the settings file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.json"))
}

/// Ensure the configuration directory exists
pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        fs::create_dir_all(config_dir).map_err(|e| {
            NavError::config(format!("Failed to create config directory: {e}"))
        })?;
    }
    Ok(())
}

/// Load and validate settings, using the default location when `path` is None
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let settings = Settings::load_from_file(&path)?;
    settings.validate()?;
    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Write default settings to `path`, creating its directory
pub fn initialize_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(NavError::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        ensure_config_dir(parent)?;
    }
    Settings::default().save_to_file(path)?;

    tracing::info!("Initialized navstack config at {}", path.display());
    Ok(())
}
