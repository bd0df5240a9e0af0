use crate::config::ProviderConfig;
use crate::model::RecipeQuery;
use crate::providers::{http_client, Generation, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::error::Error;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// A recipify proxy (or any compatible backend) that holds the model
/// credentials itself. The query is sent as-is; the backend builds the prompt.
pub struct BackendProvider {
    client: Client,
    base_url: String,
}

impl BackendProvider {
    /// Create a new backend provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(BackendProvider {
            client: http_client(timeout)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        BackendProvider {
            client: Client::new(),
            base_url,
        }
    }
}

/// The backend may answer with `{"recipe": "..."}`, `{"text": "..."}`, or
/// just the recipe as a plain-text body.
fn extract_recipe_text(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => map
            .get("recipe")
            .or_else(|| map.get("text"))
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or(body),
        Ok(Value::String(text)) => text,
        _ => body,
    }
}

#[async_trait]
impl LlmProvider for BackendProvider {
    fn name(&self) -> &str {
        "backend"
    }

    async fn generate(
        &self,
        query: &RecipeQuery,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/generate-recipe", self.base_url))
            .json(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Backend responded with {}", status);

        if !status.is_success() {
            return Err(format!("Backend error: {} - {}", status, body).into());
        }

        let mut generation = Generation::text_only(extract_recipe_text(body));
        generation.metadata.latency_ms = start.elapsed().as_millis() as u64;
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_extract_recipe_text() {
        assert_eq!(
            extract_recipe_text(r#"{"recipe": "Soup\nIngredients"}"#.to_string()),
            "Soup\nIngredients"
        );
        assert_eq!(
            extract_recipe_text(r#"{"text": "Soup"}"#.to_string()),
            "Soup"
        );
        assert_eq!(extract_recipe_text("Plain soup".to_string()), "Plain soup");
        // a bare recipe object is passed through for the normalizer to read
        assert_eq!(
            extract_recipe_text(r#"{"title": "Soup"}"#.to_string()),
            r#"{"title": "Soup"}"#
        );
    }

    #[tokio::test]
    async fn test_generate_sends_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-recipe")
            .match_body(Matcher::Json(json!({
                "ingredients": "rice, beans",
                "cuisine": "cuban",
                "dietary": null
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"recipe": "Moros y Cristianos"}"#)
            .create_async()
            .await;

        let provider = BackendProvider::with_base_url(server.url());
        let query = RecipeQuery::new("rice, beans")
            .unwrap()
            .with_cuisine(Some("cuban"));

        let generation = provider.generate(&query).await.unwrap();
        assert_eq!(generation.text, "Moros y Cristianos");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_backend_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate-recipe")
            .with_status(500)
            .with_body(r#"{"detail": "Gemini API key not found"}"#)
            .create_async()
            .await;

        let provider = BackendProvider::with_base_url(server.url());
        let query = RecipeQuery::new("rice").unwrap();

        let err = provider.generate(&query).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Backend error: 500"));
        assert!(message.contains("Gemini API key not found"));
    }
}
