use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Quiver server.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Cloudflare account identifier used to address the Workers AI API.
    pub cloudflare_account_id: String,
    /// Bearer token authorizing calls to the Workers AI API.
    pub cloudflare_api_token: String,
    /// Embedding model identifier passed to the provider.
    pub embedding_model: String,
    /// Optional full-endpoint override for the embedding API (gateways, tests).
    pub embedding_api_url: Option<String>,
    /// Upper bound in seconds on a single embedding provider call.
    pub embedding_timeout_secs: u64,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

/// Default embedding model when `EMBEDDING_MODEL` is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "@cf/baai/bge-large-en-v1.5";

/// Default provider call timeout when `EMBEDDING_TIMEOUT_SECS` is unset.
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 60;

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloudflare_account_id: load_env("CLOUDFLARE_ACCOUNT_ID")?,
            cloudflare_api_token: load_env("CLOUDFLARE_API_TOKEN")?,
            embedding_model: load_env_optional("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_api_url: load_env_optional("EMBEDDING_API_URL"),
            embedding_timeout_secs: load_env_optional("EMBEDDING_TIMEOUT_SECS")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("EMBEDDING_TIMEOUT_SECS".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_EMBEDDING_TIMEOUT_SECS),
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

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
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
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        account = %config.cloudflare_account_id,
        model = %config.embedding_model,
        api_url = ?config.embedding_api_url,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
