use crate::config::{AppConfig, ProviderConfig};
use crate::providers::{
    AnthropicProvider, BackendProvider, GoogleProvider, LlmProvider, OllamaProvider,
    OpenAIProvider,
};
use std::error::Error;
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            "ollama" => Ok(Box::new(OllamaProvider::new(config, timeout)?)),
            "backend" => Ok(Box::new(BackendProvider::new(config, timeout)?)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Get the default provider from configuration
    ///
    /// A default provider without a `[providers.<name>]` section is created
    /// with built-in settings, taking its API key from the environment.
    pub fn get_default_provider(
        config: &AppConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        let provider_name = &config.default_provider;
        let timeout = Duration::from_secs(config.timeout);

        match config.providers.get(provider_name) {
            Some(provider_config) => Self::create(provider_name, provider_config, timeout),
            None => Self::create(provider_name, &ProviderConfig::with_model(""), timeout),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai", "anthropic", "ollama", "backend"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn create_test_provider_config() -> ProviderConfig {
        let mut config = ProviderConfig::with_model("test-model");
        config.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    fn test_create_each_provider() {
        let config = create_test_provider_config();
        for name in ProviderFactory::available_providers() {
            let provider = ProviderFactory::create(name, &config, TIMEOUT).unwrap();
            assert_eq!(provider.name(), name);
        }
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = create_test_provider_config();
        let result = ProviderFactory::create("unknown", &config, TIMEOUT);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Unknown provider"));
        }
    }

    #[test]
    fn test_create_disabled_provider() {
        let mut config = create_test_provider_config();
        config.enabled = false;

        let result = ProviderFactory::create("openai", &config, TIMEOUT);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("not enabled in configuration"));
        }
    }

    #[test]
    fn test_get_default_provider() {
        let mut providers = HashMap::new();
        providers.insert("openai".to_string(), create_test_provider_config());

        let app_config = AppConfig {
            default_provider: "openai".to_string(),
            providers,
            ..Default::default()
        };

        let provider = ProviderFactory::get_default_provider(&app_config).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_get_default_provider_without_section() {
        // ollama needs no key, so it can be built from defaults alone
        let app_config = AppConfig {
            default_provider: "ollama".to_string(),
            ..Default::default()
        };

        let provider = ProviderFactory::get_default_provider(&app_config).unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_get_default_provider_unknown() {
        let app_config = AppConfig {
            default_provider: "nope".to_string(),
            ..Default::default()
        };

        assert!(ProviderFactory::get_default_provider(&app_config).is_err());
    }

    #[test]
    fn test_available_providers() {
        let providers = ProviderFactory::available_providers();
        assert_eq!(providers.len(), 5);
        assert!(providers.contains(&"google"));
        assert!(providers.contains(&"backend"));
    }
}
