use crate::model::RecipeQuery;

pub const DEFAULT_PREP_TIME: &str = "10 minutes";
pub const DEFAULT_COOK_TIME: &str = "20 minutes";
pub const DEFAULT_SERVINGS: &str = "2-4";
pub const DEFAULT_DIFFICULTY: &str = "Easy";
pub const DEFAULT_CUISINE: &str = "International";
pub const FALLBACK_INSTRUCTION: &str = "Prepare and cook your ingredients as desired.";

/// "Italian" for an "italian" query, "Delicious" without a cuisine.
pub(crate) fn title_prefix(query: &RecipeQuery) -> String {
    query
        .cuisine()
        .map(capitalize)
        .unwrap_or_else(|| "Delicious".to_string())
}

pub fn default_title(query: &RecipeQuery) -> String {
    format!("{} Recipe", title_prefix(query))
}

pub fn default_description(query: &RecipeQuery) -> String {
    format!("A creative recipe using {}", query.ingredients())
}

pub fn default_cuisine(query: &RecipeQuery) -> String {
    query.cuisine().unwrap_or(DEFAULT_CUISINE).to_string()
}

/// Stand-in ingredient entry when the response yielded none.
pub fn fallback_ingredient(query: &RecipeQuery) -> String {
    format!("1 cup {}", query.first_ingredient())
}

/// Guarantee both lists are non-empty.
pub(crate) fn fill_missing_lists(
    query: &RecipeQuery,
    ingredients: &mut Vec<String>,
    instructions: &mut Vec<String>,
) {
    if ingredients.is_empty() {
        ingredients.push(fallback_ingredient(query));
    }
    if instructions.is_empty() {
        instructions.push(FALLBACK_INSTRUCTION.to_string());
    }
}

/// Uppercase the first character only; the rest is left as typed.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
