use crate::config::ProviderConfig;
use crate::model::RecipeQuery;
use crate::prompt::build_recipe_prompt;
use crate::providers::{
    error_message, http_client, model_or, Generation, GenerationMetadata, LlmProvider,
    TokenUsage,
};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::error::Error;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variables
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or("GOOGLE_API_KEY not found in config or environment")?;

        Ok(GoogleProvider {
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
        GoogleProvider {
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
impl LlmProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn generate(
        &self,
        query: &RecipeQuery,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        // The key travels in a header so it never shows up in request URLs or errors
        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": build_recipe_prompt(query) }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": self.max_tokens
                }
            }))
            .send()
            .await?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            debug!("Google Gemini error response: {:?}", body);
            let message = match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    "API rate limit exceeded. Please try again in a moment.".to_string()
                }
                StatusCode::FORBIDDEN => "API access denied. Please check your API key.".to_string(),
                _ => match error_message(&body) {
                    Some(message) => format!("API request failed: {}: {}", status.as_u16(), message),
                    None => format!("API request failed: {}", status.as_u16()),
                },
            };
            return Err(message.into());
        }

        let response_body: Value = response.json().await?;
        debug!("Google Gemini response: {:?}", response_body);

        if let Some(message) = error_message(&response_body) {
            return Err(format!("Google Gemini API error: {}", message).into());
        }

        let text = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or("Invalid response format from Google Gemini API")?
            .to_string();

        Ok(Generation {
            text,
            metadata: GenerationMetadata {
                model_version: response_body["modelVersion"].as_str().map(String::from),
                tokens_used: TokenUsage {
                    input_tokens: response_body["usageMetadata"]["promptTokenCount"]
                        .as_u64()
                        .map(|v| v as u32),
                    output_tokens: response_body["usageMetadata"]["candidatesTokenCount"]
                        .as_u64()
                        .map(|v| v as u32),
                },
                latency_ms,
            },
        })
    }
}
