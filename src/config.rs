use crate::models::{CatalogError, SupportedModels};
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Default base URL of the local Ollama runtime.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// `SUPPORTED_MODELS` did not describe a usable catalog.
    #[error("Invalid SUPPORTED_MODELS: {0}")]
    Catalog(#[from] CatalogError),
    /// Configuration was initialized twice.
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Runtime configuration shared by the HTTP, CLI, and MCP front ends.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Ollama instance serving summarization models.
    pub ollama_url: String,
    /// Ordered catalog of selectable models; the first entry is the default.
    pub supported_models: SupportedModels,
    /// Optional per-request timeout applied by the model backend.
    pub ollama_timeout: Option<Duration>,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let supported_models = match load_env_optional("SUPPORTED_MODELS") {
            Some(raw) => SupportedModels::parse_list(&raw)?,
            None => SupportedModels::builtin(),
        };

        Ok(Self {
            ollama_url: load_env_optional("OLLAMA_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            supported_models,
            ollama_timeout: load_env_optional("OLLAMA_TIMEOUT_SECS")
                .map(|value| {
                    value
                        .parse::<u64>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .map(Duration::from_secs)
                        .ok_or_else(|| ConfigError::InvalidValue("OLLAMA_TIMEOUT_SECS".into()))
                })
                .transpose()?,
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            supported_models: SupportedModels::builtin(),
            ollama_timeout: None,
            server_port: None,
        }
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        ollama_url = %config.ollama_url,
        models = ?config.supported_models.as_slice(),
        default_model = config.supported_models.default_model(),
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(get_config())
}
