mod anthropic;
mod backend;
mod factory;
mod fallback;
mod google;
mod ollama;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use backend::BackendProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use google::GoogleProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::time::Duration;

use crate::model::RecipeQuery;

/// Token usage information from a model call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Number of input/prompt tokens
    pub input_tokens: Option<u32>,
    /// Number of output/completion tokens
    pub output_tokens: Option<u32>,
}

/// Metadata about a completed model call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    /// Model version reported by the provider
    pub model_version: Option<String>,
    /// Token usage statistics
    pub tokens_used: TokenUsage,
    /// Request latency in milliseconds
    pub latency_ms: u64,
}

/// Raw text produced by a provider for one query
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Model output, not yet normalized
    pub text: String,
    pub metadata: GenerationMetadata,
}

impl Generation {
    /// A generation without any metadata (e.g. plain-text backends)
    pub fn text_only(text: impl Into<String>) -> Self {
        Generation {
            text: text.into(),
            metadata: GenerationMetadata::default(),
        }
    }
}

/// Unified trait for everything that can produce recipe text for a query
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn name(&self) -> &str;

    /// Ask the upstream service for a recipe
    async fn generate(
        &self,
        query: &RecipeQuery,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>>;
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client, Box<dyn Error + Send + Sync>> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Pick the configured model, or the provider's default when none is set.
pub(crate) fn model_or(model: &str, default: &str) -> String {
    if model.trim().is_empty() {
        default.to_string()
    } else {
        model.to_string()
    }
}

/// Turn a non-success response into an error carrying the upstream message.
pub(crate) async fn ensure_success(
    provider: &str,
    response: Response,
) -> Result<Response, Box<dyn Error + Send + Sync>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| error_message(&json))
        .unwrap_or(body);

    Err(format!("{} API error ({}): {}", provider, status.as_u16(), message).into())
}

/// Pull an error message out of the common `{"error": ...}` envelopes.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    error
        .as_str()
        .or_else(|| error["message"].as_str())
        .map(String::from)
}
