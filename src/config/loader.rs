// Configuration loader
// Loads settings from ~/.riseup/config.toml, with GEMINI_API_KEY as a fallback

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::GEMINI_API_KEY_ENV;
use super::settings::Config;

/// Default config file location
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".riseup").join("config.toml"))
}

/// Load configuration from the default location or the environment
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load configuration from `path`, falling back to defaults when it is absent.
///
/// The environment key only fills in a missing key; a key written in the file wins.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str::<Config>(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        Config::default()
    };

    if config.gemini.api_key.trim().is_empty() {
        if let Ok(key) = std::env::var(GEMINI_API_KEY_ENV) {
            config.gemini.api_key = key;
        }
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
