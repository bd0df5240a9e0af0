use mockito::{Matcher, Server};
use recipify::config::{AppConfig, FallbackConfig, ProviderConfig};
use recipify::{generic_recipe, ProviderKind, RecipeGenerator, RecipeQuery, RecipeSource};
use serde_json::json;
use std::time::Duration;

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }],
        "modelVersion": "gemini-2.0-flash",
        "usageMetadata": { "promptTokenCount": 90, "candidatesTokenCount": 210 }
    })
    .to_string()
}

#[tokio::test]
async fn test_google_response_is_normalized() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Regex("rice, tomato".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(
            "```json\n{\"title\":\"Tomato Rice\",\"ingredients\":[\"rice\",\"tomato\"],\"instructions\":[\"cook\"]}\n```",
        ))
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .provider(ProviderKind::Google)
        .api_key("test-key")
        .base_url(server.url())
        .build_with_config(&AppConfig::default())
        .unwrap();

    let query = RecipeQuery::new("rice, tomato").unwrap();
    let generated = generator.generate(&query).await;

    mock.assert_async().await;
    assert!(!generated.is_fallback());
    assert_eq!(generated.recipe.title, "Tomato Rice");
    assert_eq!(generated.recipe.ingredients, vec!["rice", "tomato"]);
    assert_eq!(generated.recipe.prep_time, "10 minutes");

    match generated.source {
        RecipeSource::Generated { provider, metadata } => {
            assert_eq!(provider, "google");
            assert_eq!(metadata.model_version.as_deref(), Some("gemini-2.0-flash"));
        }
        RecipeSource::Fallback { .. } => panic!("expected a generated recipe"),
    }
}

#[tokio::test]
async fn test_backend_text_is_normalized() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/generate-recipe")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "recipe": "Spicy Bean Stew\nIngredients:\nbeans\nonion\nInstructions:\nSimmer 20 min"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .provider(ProviderKind::Backend)
        .base_url(server.url())
        .build_with_config(&AppConfig::default())
        .unwrap();

    let query = RecipeQuery::new("beans, onion").unwrap();
    let generated = generator.generate(&query).await;

    assert_eq!(generated.recipe.title, "Spicy Bean Stew");
    assert_eq!(generated.recipe.ingredients, vec!["beans", "onion"]);
    assert_eq!(generated.recipe.instructions, vec!["Simmer 20 min"]);
}

#[tokio::test]
async fn test_upstream_failure_gives_generic_recipe() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/generate-recipe")
        .with_status(500)
        .with_body(r#"{"detail": "API request failed: 503"}"#)
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .provider(ProviderKind::Backend)
        .base_url(server.url())
        .build_with_config(&AppConfig::default())
        .unwrap();

    let query = RecipeQuery::new("kale, lemon").unwrap();
    let generated = generator.generate(&query).await;

    assert!(generated.is_fallback());
    assert_eq!(generated.recipe, generic_recipe(&query));
    assert_eq!(generated.recipe.title, "Delicious kale Recipe");
    assert!(generated.notice().unwrap().contains("Backend error: 500"));
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .with_status(429)
        .with_body(r#"{"error": {"message": "quota"}}"#)
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .provider(ProviderKind::Google)
        .api_key("test-key")
        .base_url(server.url())
        .build_with_config(&AppConfig::default())
        .unwrap();

    let query = RecipeQuery::new("kale").unwrap();
    let err = generator.generate_raw(&query).await.unwrap_err();
    assert!(err
        .to_string()
        .contains("API rate limit exceeded. Please try again in a moment."));
}

#[tokio::test]
async fn test_configured_chain_falls_through_to_next_provider() {
    let mut failing = Server::new_async().await;
    let failing_mock = failing
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let mut working = Server::new_async().await;
    working
        .mock("POST", "/generate-recipe")
        .with_status(200)
        .with_body("Kale Lemon Salad\nIngredients:\nkale\nlemon\nSteps:\nToss together")
        .create_async()
        .await;

    let mut google = ProviderConfig::with_model("");
    google.api_key = Some("test-key".to_string());
    google.base_url = Some(failing.url());

    let mut backend = ProviderConfig::with_model("");
    backend.base_url = Some(working.url());

    let mut config = AppConfig::default();
    config.providers.insert("google".to_string(), google);
    config.providers.insert("backend".to_string(), backend);
    config.fallback = FallbackConfig {
        enabled: true,
        order: vec!["google".to_string(), "backend".to_string()],
        retry_attempts: 2,
        retry_delay_ms: 1,
    };

    let generator = RecipeGenerator::builder()
        .timeout(Duration::from_secs(5))
        .build_with_config(&config)
        .unwrap();
    assert_eq!(generator.provider_name(), "fallback");

    let query = RecipeQuery::new("kale, lemon").unwrap();
    let generated = generator.generate(&query).await;

    failing_mock.assert_async().await;
    assert!(!generated.is_fallback());
    assert_eq!(generated.recipe.title, "Kale Lemon Salad");
    assert_eq!(generated.recipe.instructions, vec!["Toss together"]);
}
