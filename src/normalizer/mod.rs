//! Turns whatever text the model sent back into a complete [`Recipe`].
//!
//! Strategies are tried from most to least structured:
//!
//! 1. the first-`{`-to-last-`}` span of the text, decoded as the recipe JSON
//!    object the prompt asks for;
//! 2. a line scan for "Ingredients" / "Instructions" style headers;
//!
//! and any field still missing gets a fixed default. Normalization cannot fail.

mod defaults;
mod generic;
mod lines;
mod structured;

use log::debug;

use crate::model::{Recipe, RecipeQuery};

pub use defaults::{
    default_cuisine, default_description, default_title, fallback_ingredient, DEFAULT_COOK_TIME,
    DEFAULT_CUISINE, DEFAULT_DIFFICULTY, DEFAULT_PREP_TIME, DEFAULT_SERVINGS, FALLBACK_INSTRUCTION,
};
pub use generic::generic_recipe;

/// Normalize a raw model response against the query that produced it.
pub fn normalize(raw_text: &str, query: &RecipeQuery) -> Recipe {
    if let Some(recipe) = structured::parse(raw_text, query) {
        debug!("Recipe read from embedded JSON");
        return recipe;
    }

    debug!("No usable JSON in response, scanning lines");
    lines::parse(raw_text, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_preferred_over_lines() {
        let query = RecipeQuery::new("rice").unwrap();
        let text = "Ingredients:\nflour\n{\"title\": \"Rice Bowl\", \"ingredients\": [\"rice\"]}";
        let recipe = normalize(text, &query);

        assert_eq!(recipe.title, "Rice Bowl");
        assert_eq!(recipe.ingredients, vec!["rice"]);
    }

    #[test]
    fn test_broken_json_falls_back_to_lines() {
        let query = RecipeQuery::new("beans").unwrap();
        let text = "Bean Soup {broken\nIngredients\nbeans\n}";
        let recipe = normalize(text, &query);

        assert_eq!(recipe.title, "Bean Soup {broken");
        assert_eq!(recipe.ingredients, vec!["beans", "}"]);
    }
}
