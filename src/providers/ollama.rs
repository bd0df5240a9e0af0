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

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";

/// Local models served by Ollama. No API key involved.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OllamaProvider {
            client: http_client(timeout)?,
            base_url,
            model: model_or(&config.model, DEFAULT_MODEL),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        query: &RecipeQuery,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        // Ollama uses OpenAI-compatible API
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": build_recipe_prompt(query)}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response = ensure_success("Ollama", response).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);

        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to extract content from Ollama response")?
            .to_string();

        Ok(Generation {
            text,
            metadata: GenerationMetadata {
                model_version: response_body["model"].as_str().map(String::from),
                tokens_used: TokenUsage {
                    input_tokens: response_body["usage"]["prompt_tokens"]
                        .as_u64()
                        .map(|v| v as u32),
                    output_tokens: response_body["usage"]["completion_tokens"]
                        .as_u64()
                        .map(|v| v as u32),
                },
                latency_ms,
            },
        })
    }
}
