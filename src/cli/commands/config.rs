use crate::cli::output::Output;
use crate::cli::ConfigAction;
use crate::config::{default_config_path, ensure_config_dir, initialize_config, Settings};
use crate::errors::Result;
use std::path::{Path, PathBuf};

/// Handle configuration commands
pub async fn run(action: ConfigAction, config_path: Option<PathBuf>) -> Result<()> {
    let config_file = match config_path {
        Some(path) => path,
        None => default_config_path()?,
    };

    match action {
        ConfigAction::Init { force } => init_config(&config_file, force).await,
        ConfigAction::Set { key, value } => set_config_value(&config_file, &key, &value).await,
        ConfigAction::Get { key } => get_config_value(&config_file, &key).await,
        ConfigAction::List => list_config_values(&config_file).await,
    }
}

async fn init_config(config_file: &Path, force: bool) -> Result<()> {
    initialize_config(config_file, force)?;
    Output::success(format!("Wrote default settings to {}", config_file.display()));
    Ok(())
}

async fn set_config_value(config_file: &Path, key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load_from_file(config_file)?;
    settings.set_value(key, value)?;
    settings.validate()?;
    if let Some(parent) = config_file.parent() {
        ensure_config_dir(parent)?;
    }
    settings.save_to_file(config_file)?;

    Output::success(format!("Configuration updated: {key} = {value}"));

    if key == "events.channel_capacity" {
        Output::tip("Subscribers that fall behind by more than this many events skip ahead");
    }

    Ok(())
}

async fn get_config_value(config_file: &Path, key: &str) -> Result<()> {
    let settings = Settings::load_from_file(config_file)?;
    let value = settings.get_value(key)?;

    println!("{key} = {value}");
    Ok(())
}

async fn list_config_values(config_file: &Path) -> Result<()> {
    let settings = Settings::load_from_file(config_file)?;

    Output::section(format!("navstack configuration ({})", config_file.display()));
    for key in Settings::keys() {
        Output::bullet(format!("{key} = {}", settings.get_value(key)?));
    }
    Ok(())
}
