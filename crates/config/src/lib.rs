//! Configuration loading, validation, and management for EduAssist.
//!
//! Loads configuration from `~/.eduassist/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.eduassist/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the remote assistant. Without one, every chat reply
    /// comes from the local fallback matcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Seed a demo class when the data tree is empty
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,

    /// Remote assistant settings
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Where the data tree is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Activity log settings
    #[serde(default)]
    pub activity: ActivityConfig,
}

fn default_true() -> bool {
    true
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("assistant", &self.assistant)
            .field("storage", &self.storage)
            .field("activity", &self.activity)
            .field("seed_demo_data", &self.seed_demo_data)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Output cap per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Override the API base URL (proxies, tests)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Per-request timeout. Unset means the call may take as long as the
    /// transport allows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}
fn default_max_tokens() -> u32 {
    1000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_url: None,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON data file. Defaults to `~/.eduassist/data.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| AppConfig::config_dir().join("data.json"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Most recent entries kept in the activity log
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    50
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.eduassist/config.toml).
    ///
    /// Also checks environment variables:
    /// - `EDUASSIST_API_KEY` (highest priority), then `ANTHROPIC_API_KEY`
    /// - `EDUASSIST_MODEL`
    /// - `EDUASSIST_DATA_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("EDUASSIST_API_KEY")
                .ok()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
                .filter(|k| !k.trim().is_empty());
        }

        if let Ok(model) = std::env::var("EDUASSIST_MODEL") {
            config.assistant.model = model;
        }

        if let Ok(path) = std::env::var("EDUASSIST_DATA_PATH") {
            config.storage.data_path = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".eduassist")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.assistant.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assistant.model must not be empty".into(),
            ));
        }

        if self.assistant.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.max_tokens must be > 0".into(),
            ));
        }

        if self.assistant.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "assistant.request_timeout_secs must be > 0 when set".into(),
            ));
        }

        if self.activity.max_entries == 0 {
            return Err(ConfigError::ValidationError(
                "activity.max_entries must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant: AssistantConfig::default(),
            storage: StorageConfig::default(),
            activity: ActivityConfig::default(),
            seed_demo_data: true,
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
