use crate::config::ProviderConfig;
use crate::model::RecipeQuery;
use crate::prompt::build_recipe_prompt;
use crate::providers::{
    ensure_success, http_client, model_or, Generation, GenerationMetadata, LlmProvider,
    TokenUsage,
};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or("ANTHROPIC_API_KEY not found in config or environment")?;

        Ok(AnthropicProvider {
            client: http_client(timeout)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model_or(&config.model, DEFAULT_MODEL),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(
        &self,
        query: &RecipeQuery,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "messages": [
                    {
                        "role": "user",
                        "content": build_recipe_prompt(query)
                    }
                ]
            }))
            .send()
            .await?;

        let response = ensure_success("Anthropic", response).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let response_body: Value = response.json().await?;
        debug!("Anthropic response: {:?}", response_body);

        let text = response_body["content"][0]["text"]
            .as_str()
            .ok_or("Failed to extract content from Anthropic response")?
            .to_string();

        Ok(Generation {
            text,
            metadata: GenerationMetadata {
                model_version: response_body["model"].as_str().map(String::from),
                tokens_used: TokenUsage {
                    input_tokens: response_body["usage"]["input_tokens"]
                        .as_u64()
                        .map(|v| v as u32),
                    output_tokens: response_body["usage"]["output_tokens"]
                        .as_u64()
                        .map(|v| v as u32),
                },
                latency_ms,
            },
        })
    }
}
