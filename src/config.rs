use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Everything `recipify.toml` and `RECIPIFY__*` variables can set
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used when no chain is configured (`google` unless set)
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Per-provider settings, keyed by `google`, `openai`, `anthropic`, `ollama`, `backend`
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Chain of providers to try in turn
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Proxy server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Recipe history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            fallback: FallbackConfig::default(),
            timeout: default_timeout(),
            server: ServerConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

/// Settings for one upstream provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Disabled providers are skipped by the chain and refused by the factory
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.0-flash", "gpt-4o-mini")
    #[serde(default)]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Output token limit for one recipe
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Credential for the upstream API. Stays on the machine running recipify.
    pub api_key: Option<String>,
    /// Override for the API root, e.g. a recipify proxy or a local mock
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// A minimal enabled configuration for the given model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Provider chain and retry policy
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// Off means only `default_provider` is used, with a single attempt
    #[serde(default)]
    pub enabled: bool,
    /// Provider names, tried first to last
    #[serde(default)]
    pub order: Vec<String>,
    /// Attempts per provider before moving to the next one
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Initial delay between retries in milliseconds (grows with each attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Where the proxy server listens
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where generated recipes are kept
#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Path of the JSON store file
    #[serde(default = "default_history_path")]
    pub path: String,
    /// Maximum number of recipes kept, newest first
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            capacity: default_history_capacity(),
        }
    }
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_timeout() -> u64 {
    60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_history_path() -> String {
    "recipify-history.json".to_string()
}

fn default_history_capacity() -> usize {
    20
}

impl AppConfig {
    /// Read `recipify.toml` from the working directory (if any), then let
    /// `RECIPIFY__` variables override it, e.g.
    /// `RECIPIFY__PROVIDERS__GOOGLE__API_KEY` or `RECIPIFY__SERVER__PORT`.
    /// Anything unset keeps its default.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// See [`AppConfig::load`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("recipify").required(false))
        .add_source(
            Environment::with_prefix("RECIPIFY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
