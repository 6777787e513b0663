//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use waypoint_ai::providers::openai::DEFAULT_BASE_URL;

/// Default listen address for `waypoint serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Configuration for waypoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model identifier override
    pub model: Option<String>,
    /// OpenAI-compatible API base URL
    pub base_url: Option<String>,
    /// Address `serve` listens on
    pub bind: Option<String>,
    /// Endpoint `chat` talks to
    pub endpoint: Option<String>,
    /// API key (alternative to OPENAI_API_KEY)
    pub api_key: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("waypoint")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("WAYPOINT_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Write the example config if no file exists yet
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, example_config())?;
        Ok(path)
    }

    /// API key from config, then OPENAI_API_KEY. Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        waypoint_ai::get_api_key(self.api_key.as_deref(), "OPENAI_API_KEY").ok()
    }

    /// Model: CLI flag, then OPENAI_MODEL, then config, then the default
    pub fn model(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| non_empty_env("OPENAI_MODEL"))
            .or_else(|| non_empty(self.model.as_deref()))
            .unwrap_or_else(|| waypoint_agent::DEFAULT_MODEL.to_string())
    }

    /// Base URL: config, then OPENAI_BASE_URL, then the public API
    pub fn base_url(&self) -> String {
        non_empty(self.base_url.as_deref())
            .or_else(|| non_empty_env("OPENAI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn bind(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| non_empty(self.bind.as_deref()))
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn endpoint(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| non_empty(self.endpoint.as_deref()))
            .unwrap_or_else(|| waypoint_dashboard::DEFAULT_ENDPOINT.to_string())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_empty_env(var: &str) -> Option<String> {
    non_empty(std::env::var(var).ok().as_deref())
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# waypoint configuration file
# Place at ~/.config/waypoint/config.toml (Linux) or set WAYPOINT_CONFIG_PATH

# Model identifier (OPENAI_MODEL overrides this)
# model = "gpt-4o-mini"

# OpenAI-compatible API base URL
# base_url = "https://api.openai.com/v1"

# Address for `waypoint serve`
bind = "127.0.0.1:8787"

# Endpoint for `waypoint chat`
endpoint = "http://127.0.0.1:8787/api/agent"

# API key (prefer the OPENAI_API_KEY environment variable).
# Without a key the endpoint answers in local guidance mode.
# api_key = "sk-..."
"#
}
