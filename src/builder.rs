use std::time::Duration;

use crate::config::{AppConfig, ProviderConfig};
use crate::error::{RecipifyError, Result};
use crate::generator::RecipeGenerator;
use crate::providers::{FallbackProvider, LlmProvider, ProviderFactory};

/// Which upstream service to ask for recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    OpenAI,
    Anthropic,
    Ollama,
    /// A recipify proxy server holding the credentials
    Backend,
}

impl ProviderKind {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Backend => "backend",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = RecipifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "google" | "gemini" => Ok(ProviderKind::Google),
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "ollama" => Ok(ProviderKind::Ollama),
            "backend" => Ok(ProviderKind::Backend),
            other => Err(RecipifyError::BuilderError(format!(
                "Unknown provider '{}'. Available: {}",
                other,
                ProviderFactory::available_providers().join(", ")
            ))),
        }
    }
}

/// Builder for configuring a [`RecipeGenerator`]
#[derive(Debug, Default)]
pub struct RecipeGeneratorBuilder {
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RecipeGeneratorBuilder {
    /// Use a specific provider instead of the configured chain
    ///
    /// # Example
    /// ```
    /// use recipify::{ProviderKind, RecipeGenerator};
    ///
    /// let builder = RecipeGenerator::builder().provider(ProviderKind::Ollama);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a different endpoint (proxy, self-hosted, tests)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipify::RecipeGenerator;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeGenerator::builder().timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    fn has_overrides(&self) -> bool {
        self.provider.is_some()
            || self.api_key.is_some()
            || self.model.is_some()
            || self.base_url.is_some()
    }

    /// Build the generator, loading `recipify.toml` and `RECIPIFY__*`
    /// environment variables for anything not set on the builder
    ///
    /// # Errors
    /// Returns `RecipifyError` if the configuration cannot be loaded or the
    /// selected provider cannot be created (e.g. missing API key).
    pub fn build(self) -> Result<RecipeGenerator> {
        let config = AppConfig::load()?;
        self.build_with_config(&config)
    }

    /// Build the generator on top of an already loaded configuration
    pub fn build_with_config(self, config: &AppConfig) -> Result<RecipeGenerator> {
        if !self.has_overrides() {
            let mut config = config.clone();
            if let Some(timeout) = self.timeout {
                config.timeout = timeout.as_secs().max(1);
            }
            let chain = FallbackProvider::new(&config)
                .map_err(|e| RecipifyError::BuilderError(e.to_string()))?;
            return Ok(RecipeGenerator::new(Box::new(chain)));
        }

        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config = config
            .providers
            .get(&provider_name)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::with_model(""));

        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }
        // An explicit choice on the builder overrides `enabled = false`
        provider_config.enabled = true;

        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));

        let provider: Box<dyn LlmProvider> =
            ProviderFactory::create(&provider_name, &provider_config, timeout)
                .map_err(|e| RecipifyError::BuilderError(e.to_string()))?;

        Ok(RecipeGenerator::new(provider))
    }
}
