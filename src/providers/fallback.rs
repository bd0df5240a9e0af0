use crate::config::AppConfig;
use crate::model::RecipeQuery;
use crate::providers::{Generation, LlmProvider, ProviderFactory};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;

/// Tries a chain of providers in order, retrying each before moving on.
pub struct FallbackProvider {
    providers: Vec<Box<dyn LlmProvider>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackProvider {
    /// Build the chain named in `config.fallback`, skipping providers that are
    /// disabled or cannot be created (e.g. no API key)
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if !config.fallback.enabled {
            let default_provider = ProviderFactory::get_default_provider(config)?;
            return Ok(FallbackProvider {
                providers: vec![default_provider],
                retry_attempts: 1,
                retry_delay_ms: 0,
            });
        }

        let timeout = Duration::from_secs(config.timeout);
        let mut providers = Vec::new();

        for provider_name in &config.fallback.order {
            if let Some(provider_config) = config.providers.get(provider_name) {
                if provider_config.enabled {
                    match ProviderFactory::create(provider_name, provider_config, timeout) {
                        Ok(provider) => {
                            info!("Added '{}' to fallback chain", provider_name);
                            providers.push(provider);
                        }
                        Err(e) => {
                            warn!("Failed to initialize provider '{}': {}", provider_name, e);
                        }
                    }
                }
            } else {
                warn!(
                    "Provider '{}' in fallback order not found in configuration",
                    provider_name
                );
            }
        }

        Self::from_providers(
            providers,
            config.fallback.retry_attempts,
            config.fallback.retry_delay_ms,
        )
    }

    /// Build a chain from already constructed providers
    pub fn from_providers(
        providers: Vec<Box<dyn LlmProvider>>,
        retry_attempts: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if providers.is_empty() {
            return Err("No providers available in fallback configuration".into());
        }

        Ok(FallbackProvider {
            providers,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        })
    }

    /// Try a provider with retry logic; the delay grows with each attempt
    async fn try_provider_with_retry(
        &self,
        provider: &dyn LlmProvider,
        query: &RecipeQuery,
    ) -> Result<Generation, String> {
        let mut last_error = String::new();

        for attempt in 1..=self.retry_attempts {
            debug!(
                "Generating with {} (attempt {}/{})",
                provider.name(),
                attempt,
                self.retry_attempts
            );

            match provider.generate(query).await {
                Ok(generation) => {
                    info!("Generated recipe using {}", provider.name());
                    return Ok(generation);
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        provider.name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.retry_attempts {
                let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                debug!("Waiting {:?} before retry", delay);
                sleep(delay).await;
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl LlmProvider for FallbackProvider {
    fn name(&self) -> &str {
        // A single-provider chain is just that provider
        match self.providers.as_slice() {
            [only] => only.name(),
            _ => "fallback",
        }
    }

    async fn generate(
        &self,
        query: &RecipeQuery,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        let mut all_errors: Vec<String> = Vec::new();

        for provider in &self.providers {
            match self.try_provider_with_retry(provider.as_ref(), query).await {
                Ok(generation) => return Ok(generation),
                Err(e) => {
                    all_errors.push(format!("{}: {}", provider.name(), e));
                }
            }
        }

        Err(format!("All providers failed:\n{}", all_errors.join("\n")).into())
    }
}
