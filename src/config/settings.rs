// Configuration structs

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Feature flags configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Enable debug logging for troubleshooting
    #[serde(default)]
    pub debug_logging: bool,
}

/// Gemini generative API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key, sent as the `key` query parameter
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL without trailing slash (overridable for local test servers)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Transport attempts per generation call (1 = no automatic retry)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    1
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database holding user documents
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".riseup")
        .join("riseup.db")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub features: FeaturesConfig,
}

impl Config {
    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            bail!(
                "Gemini API key is missing.\n\n\
                 Add it to ~/.riseup/config.toml:\n  \
                 [gemini]\n  \
                 api_key = \"...\"\n\n\
                 or export GEMINI_API_KEY"
            );
        }

        if self.gemini.model.trim().is_empty() {
            bail!("gemini.model must not be empty");
        }

        if !self.gemini.base_url.starts_with("http://")
            && !self.gemini.base_url.starts_with("https://")
        {
            bail!("Invalid gemini.base_url: '{}'", self.gemini.base_url);
        }

        if self.gemini.timeout_secs == 0 {
            bail!("gemini.timeout_secs must be greater than 0");
        }

        if self.gemini.max_attempts == 0 {
            bail!("gemini.max_attempts must be at least 1");
        }

        Ok(())
    }
}
