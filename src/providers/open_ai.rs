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

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: http_client(timeout)?,
            api_key,
            base_url,
            model: model_or(&config.model, DEFAULT_MODEL),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
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
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        query: &RecipeQuery,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": "You are a professional chef AI assistant."},
                    {"role": "user", "content": build_recipe_prompt(query)}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response = ensure_success("OpenAI", response).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let response_body: Value = response.json().await?;
        debug!("OpenAI response: {:?}", response_body);

        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to extract content from OpenAI response")?
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

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "model": "gpt-4o-mini-2024-07-18",
                    "choices": [{
                        "message": {
                            "content": "Pasta Night\nIngredients:\npasta\nsauce\nInstructions:\nCook pasta"
                        }
                    }],
                    "usage": {"prompt_tokens": 50, "completion_tokens": 20}
                }"#,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let query = RecipeQuery::new("pasta, sauce").unwrap();

        let generation = provider.generate(&query).await.unwrap();
        assert!(generation.text.starts_with("Pasta Night"));
        assert_eq!(generation.metadata.tokens_used.input_tokens, Some(50));
        assert_eq!(generation.metadata.tokens_used.output_tokens, Some(20));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "Invalid request"}}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let query = RecipeQuery::new("pasta").unwrap();

        let err = provider.generate(&query).await.unwrap_err();
        assert_eq!(err.to_string(), "OpenAI API error (400): Invalid request");
        mock.assert_async().await;
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            "http://localhost".to_string(),
            "gpt-4".to_string(),
        );
        assert_eq!(provider.name(), "openai");
    }
}
