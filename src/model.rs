use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RecipifyError, Result};

/// What the user asked for: the ingredients they have, plus optional hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeQuery {
    ingredients: String,
    cuisine: Option<String>,
    dietary: Option<String>,
}

impl RecipeQuery {
    /// Create a query from the raw ingredient string as typed by the user.
    ///
    /// The string is trimmed; a string with no ingredient tokens (blank, or
    /// only commas) is rejected.
    pub fn new(ingredients: impl Into<String>) -> Result<Self> {
        let query = RecipeQuery {
            ingredients: ingredients.into().trim().to_string(),
            cuisine: None,
            dietary: None,
        };
        if query.ingredient_list().is_empty() {
            return Err(RecipifyError::InvalidQuery(
                "Please enter some ingredients".to_string(),
            ));
        }
        Ok(query)
    }

    /// Set the cuisine hint. Blank values are ignored.
    pub fn with_cuisine(mut self, cuisine: Option<&str>) -> Self {
        self.cuisine = non_blank(cuisine);
        self
    }

    /// Set the dietary constraint. Blank values are ignored.
    pub fn with_dietary(mut self, dietary: Option<&str>) -> Self {
        self.dietary = non_blank(dietary);
        self
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }

    pub fn dietary(&self) -> Option<&str> {
        self.dietary.as_deref()
    }

    /// Comma-separated ingredient tokens, trimmed, without empty entries.
    pub fn ingredient_list(&self) -> Vec<&str> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// First ingredient token. A query always has at least one.
    pub fn first_ingredient(&self) -> &str {
        self.ingredient_list()
            .first()
            .copied()
            .unwrap_or(self.ingredients.as_str())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// A structured recipe, ready to be displayed.
///
/// Serializes to the same JSON shape the model is asked to produce, so a
/// `Recipe` can be fed back through the normalizer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub difficulty: String,
    pub cuisine: String,
}

/// A generated recipe as kept in the local history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecipe {
    pub id: u64,
    pub name: String,
    /// Ingredient string exactly as the user typed it
    pub ingredients: String,
    /// Recipe text as returned by the model
    pub recipe: String,
    pub date_created: DateTime<Utc>,
    pub date_viewed: DateTime<Utc>,
}
