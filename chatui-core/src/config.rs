//! Configuration loading and management

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// System prompt compiled into the binary, used when no context file is
/// configured or the configured one cannot be read
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant named ChatUI. \
Keep your answers concise and accurate, and maintain a friendly, professional tone.";

/// Root configuration for chatui
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Plain-text file whose contents replace the default system prompt
    #[serde(default)]
    pub context_file: Option<PathBuf>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the chat API
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_api_base() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for log files; defaults to `logs` under the config dir
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader with the default config directory
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .map(|h| h.join(".chatui"))
            .unwrap_or_else(|| PathBuf::from(".chatui"));

        Self { config_dir }
    }

    /// Create a new config loader with a custom config directory
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            config_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from file and environment
    pub fn load(&self) -> Result<Config> {
        let config_path = self.config_dir.join("config.json");
        let mut merged = serde_json::to_value(Config::default())?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let file_value: Value = serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", config_path.display(), e)))?;
            merge_values(&mut merged, file_value);
        }

        let mut config: Config = serde_json::from_value(merged)
            .map_err(|e| Error::Config(format!("{}: {}", config_path.display(), e)))?;
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Directory for log files
    pub fn log_dir(&self, config: &Config) -> PathBuf {
        config
            .logging
            .dir
            .clone()
            .unwrap_or_else(|| self.config_dir.join("logs"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(existing) = base_map.get_mut(&key) {
                    merge_values(existing, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = std::env::var("CHATUI_CONTEXT") {
        if !path.trim().is_empty() {
            config.context_file = Some(PathBuf::from(path));
        }
    }
    if let Ok(model) = std::env::var("CHATUI_MODEL") {
        if !model.trim().is_empty() {
            config.provider.model = model;
        }
    }
    if let Ok(host) = std::env::var("OLLAMA_HOST") {
        if !host.trim().is_empty() {
            config.provider.api_base = host;
        }
    }
}
