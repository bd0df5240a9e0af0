//! HTTP proxy in front of the model providers.
//!
//! Browsers and other clients talk to this server instead of the model API,
//! so the API credentials never leave the machine running it.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::{RecipifyError, Result};
use crate::generator::{GeneratedRecipe, RecipeGenerator};
use crate::model::RecipeQuery;

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

fn api_error(status: StatusCode, error: RecipifyError) -> ApiError {
    let detail = match error {
        RecipifyError::InvalidQuery(message) | RecipifyError::ProviderError(message) => message,
        other => other.to_string(),
    };
    (status, Json(json!({ "detail": detail })))
}

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<RecipeGenerator>,
}

/// Body accepted by both generation endpoints
#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub dietary: Option<String>,
}

impl RecipeRequest {
    fn to_query(&self) -> std::result::Result<RecipeQuery, ApiError> {
        RecipeQuery::new(self.ingredients.as_str())
            .map(|query| {
                query
                    .with_cuisine(self.cuisine.as_deref())
                    .with_dietary(self.dietary.as_deref())
            })
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))
    }
}

pub fn build_router(generator: Arc<RecipeGenerator>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate-recipe", post(generate_recipe))
        .route("/recipes", post(generate_structured))
        .layer(CorsLayer::permissive())
        .with_state(AppState { generator })
}

/// Bind and serve until the process is stopped.
pub async fn serve(generator: RecipeGenerator, host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(
        "Serving recipes on http://{} using provider '{}'",
        listener.local_addr()?,
        generator.provider_name()
    );

    axum::serve(listener, build_router(Arc::new(generator)))
        .await
        .map_err(RecipifyError::IoError)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Raw model text, for clients that do their own normalization.
async fn generate_recipe(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> ApiResult<Value> {
    let query = request.to_query()?;
    info!("Received ingredients: {}", query.ingredients());

    match state.generator.generate_raw(&query).await {
        Ok(recipe) => {
            info!("Recipe generated successfully, length: {}", recipe.len());
            Ok(Json(json!({ "recipe": recipe })))
        }
        Err(e) => {
            error!("Recipe generation failed: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Normalized recipe; upstream failures come back as a generic recipe.
async fn generate_structured(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> ApiResult<GeneratedRecipe> {
    let query = request.to_query()?;
    Ok(Json(state.generator.generate(&query).await))
}
