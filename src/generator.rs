use log::{info, warn};
use serde::Serialize;

use crate::builder::RecipeGeneratorBuilder;
use crate::error::{RecipifyError, Result};
use crate::model::{Recipe, RecipeQuery};
use crate::normalizer::{generic_recipe, normalize};
use crate::providers::{GenerationMetadata, LlmProvider};

/// Where a recipe came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipeSource {
    /// Normalized from a model response
    Generated {
        provider: String,
        metadata: GenerationMetadata,
    },
    /// The model could not be reached; built from the ingredients alone
    Fallback { reason: String },
}

/// Outcome of a generation request. Always carries a displayable recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub recipe: Recipe,
    /// Model output before normalization, when there was any
    pub raw_text: Option<String>,
    pub source: RecipeSource,
}

impl GeneratedRecipe {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RecipeSource::Fallback { .. })
    }

    /// Short message to show the user when the recipe is a stand-in
    pub fn notice(&self) -> Option<String> {
        match &self.source {
            RecipeSource::Fallback { reason } => Some(format!(
                "Could not reach the recipe service ({}). Here is a simple recipe instead.",
                reason
            )),
            RecipeSource::Generated { .. } => None,
        }
    }
}

/// Asks a provider for a recipe and normalizes the answer.
pub struct RecipeGenerator {
    provider: Box<dyn LlmProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        RecipeGenerator { provider }
    }

    /// Configure a generator step by step
    pub fn builder() -> RecipeGeneratorBuilder {
        RecipeGeneratorBuilder::default()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Upstream text for a query, untouched.
    pub async fn generate_raw(&self, query: &RecipeQuery) -> Result<String> {
        self.provider
            .generate(query)
            .await
            .map(|generation| generation.text)
            .map_err(|e| RecipifyError::ProviderError(e.to_string()))
    }

    /// A structured recipe for a query. Upstream failures are logged and
    /// answered with a generic recipe built from the ingredients.
    pub async fn generate(&self, query: &RecipeQuery) -> GeneratedRecipe {
        match self.provider.generate(query).await {
            Ok(generation) => {
                info!(
                    "Received {} characters from {}",
                    generation.text.len(),
                    self.provider.name()
                );
                GeneratedRecipe {
                    recipe: normalize(&generation.text, query),
                    raw_text: Some(generation.text),
                    source: RecipeSource::Generated {
                        provider: self.provider.name().to_string(),
                        metadata: generation.metadata,
                    },
                }
            }
            Err(e) => {
                warn!("Recipe generation failed, using generic recipe: {}", e);
                GeneratedRecipe {
                    recipe: generic_recipe(query),
                    raw_text: None,
                    source: RecipeSource::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }
}
