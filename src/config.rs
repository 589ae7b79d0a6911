//! Configuration management for the CareBridge copilot
//!
//! TOML-based configuration with built-in defaults and an environment
//! overlay. Location: ~/.carebridge/config.toml
//!
//! The router receives a fully resolved [`CopilotConfig`] at construction and
//! never consults the process environment itself.

use crate::errors::{CopilotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Gemini REST endpoint
pub const DEFAULT_CLOUD_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default local model
pub const DEFAULT_LOCAL_MODEL: &str = "phi";

/// Default cloud model
pub const DEFAULT_CLOUD_MODEL: &str = "gemini-pro";

/// Local attempts fail fast so the cloud fallback stays responsive
pub const DEFAULT_LOCAL_TIMEOUT_MS: u64 = 5_000;

/// Default cloud request timeout
pub const DEFAULT_CLOUD_TIMEOUT_MS: u64 = 30_000;

/// Deployment mode; production forces cloud-only routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    #[default]
    Development,
    Production,
}

impl DeploymentMode {
    /// Parse an environment value. Anything but "production" is development.
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            DeploymentMode::Production
        } else {
            DeploymentMode::Development
        }
    }
}

/// Complete copilot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopilotConfig {
    pub mode: DeploymentMode,
    pub server: ServerConfig,
    pub local: LocalConfig,
    pub cloud: CloudConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS (the dashboard frontend)
    pub frontend_origin: String,
}

/// Local inference endpoint (Ollama)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Full generate endpoint, e.g. http://localhost:11434/api/generate
    pub url: Option<String>,
    pub model: String,
    pub timeout_ms: u64,
}

/// Cloud generative-text API (Gemini)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            frontend_origin: "http://localhost:5173".to_string(),
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            url: None,
            model: DEFAULT_LOCAL_MODEL.to_string(),
            timeout_ms: DEFAULT_LOCAL_TIMEOUT_MS,
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_CLOUD_MODEL.to_string(),
            base_url: DEFAULT_CLOUD_BASE_URL.to_string(),
            timeout_ms: DEFAULT_CLOUD_TIMEOUT_MS,
        }
    }
}

impl CopilotConfig {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CopilotError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: CopilotConfig = toml::from_str(&contents)
            .map_err(|e| CopilotError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(CopilotConfig::default())
    }

    /// Standard config location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".carebridge").join("config.toml"))
    }

    /// Overlay environment variables on top of the loaded configuration.
    ///
    /// Empty values are treated as unset. `CAREBRIDGE_ENV` takes precedence
    /// over `NODE_ENV` when both are present.
    pub fn apply_env<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut node_env = None;
        let mut carebridge_env = None;

        for (key, value) in vars {
            let value: String = value.into();
            if value.trim().is_empty() {
                continue;
            }
            match key.as_ref() {
                "OLLAMA_URL" => self.local.url = Some(value),
                "OLLAMA_MODEL" => self.local.model = value,
                "GEMINI_API_KEY" => self.cloud.api_key = Some(value),
                "GEMINI_MODEL" => self.cloud.model = value,
                "FRONTEND_URL" => self.server.frontend_origin = value,
                "PORT" => {
                    self.server.port = value.trim().parse().map_err(|_| {
                        CopilotError::ConfigError(format!("Invalid PORT value: {}", value))
                    })?;
                }
                "NODE_ENV" => node_env = Some(value),
                "CAREBRIDGE_ENV" => carebridge_env = Some(value),
                _ => {}
            }
        }

        if let Some(mode) = carebridge_env.or(node_env) {
            self.mode = DeploymentMode::from_env_value(&mode);
        }

        self.validate()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(CopilotError::ConfigError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.local.timeout_ms == 0 {
            return Err(CopilotError::ConfigError(
                "local.timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.cloud.timeout_ms == 0 {
            return Err(CopilotError::ConfigError(
                "cloud.timeout_ms must be greater than 0".to_string(),
            ));
        }

        if let Some(url) = &self.local.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CopilotError::ConfigError(format!(
                    "local.url must be an http(s) URL: {}",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Whether routing skips the local tier entirely
    pub fn use_cloud(&self) -> bool {
        self.mode == DeploymentMode::Production || self.local.url.is_none()
    }

    pub fn local_timeout(&self) -> Duration {
        Duration::from_millis(self.local.timeout_ms)
    }

    pub fn cloud_timeout(&self) -> Duration {
        Duration::from_millis(self.cloud.timeout_ms)
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Copy safe to print: the API key is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.cloud.api_key.is_some() {
            copy.cloud.api_key = Some("********".to_string());
        }
        copy
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CopilotError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}
