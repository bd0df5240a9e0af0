//! Recipe suggestions from a list of ingredients.
//!
//! A [`RecipeGenerator`] asks a language model for a recipe and normalizes
//! whatever comes back into a complete [`Recipe`]. When the model cannot be
//! reached, a generic recipe built from the ingredients is returned instead.
//!
//! # Example
//! ```no_run
//! # async fn run() -> Result<(), recipify::RecipifyError> {
//! use recipify::{RecipeGenerator, RecipeQuery};
//!
//! let generator = RecipeGenerator::builder().build()?;
//! let query = RecipeQuery::new("chicken, rice, broccoli")?.with_cuisine(Some("Asian"));
//! let generated = generator.generate(&query).await;
//! println!("{}", generated.recipe.title);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod normalizer;
pub mod prompt;
pub mod providers;
pub mod render;
pub mod server;
pub mod store;

pub use builder::{ProviderKind, RecipeGeneratorBuilder};
pub use config::AppConfig;
pub use error::RecipifyError;
pub use generator::{GeneratedRecipe, RecipeGenerator, RecipeSource};
pub use model::{Recipe, RecipeQuery, StoredRecipe};
pub use normalizer::{generic_recipe, normalize};

/// Generate a recipe with the configured providers.
///
/// Shorthand for building a default [`RecipeGenerator`] and running one query.
/// Only invalid input or configuration is an error; an unreachable model
/// yields a generic recipe.
pub async fn generate_recipe(ingredients: &str) -> Result<Recipe, RecipifyError> {
    let query = RecipeQuery::new(ingredients)?;
    let generator = RecipeGenerator::builder().build()?;
    Ok(generator.generate(&query).await.recipe)
}
