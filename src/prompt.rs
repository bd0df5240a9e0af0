use crate::model::RecipeQuery;

/// The prompt template sent to every model provider.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, so it can be edited without dealing with Rust
/// string syntax. It contains a `{{REQUEST}}` placeholder which is replaced
/// with the user's request by [`build_recipe_prompt`].
pub const RECIPE_PROMPT: &str = include_str!("prompt.txt");

/// Describe what the user asked for in one or more sentences.
fn describe_request(query: &RecipeQuery) -> String {
    let mut request = format!(
        "Create a detailed recipe using these ingredients: {}.",
        query.ingredients()
    );

    if let Some(cuisine) = query.cuisine() {
        request.push_str(&format!(" Make it in {cuisine} style."));
    }

    if let Some(dietary) = query.dietary() {
        request.push_str(&format!(" Ensure it's {dietary} friendly."));
    }

    request
}

/// Build the full prompt for a query.
pub fn build_recipe_prompt(query: &RecipeQuery) -> String {
    RECIPE_PROMPT.replace("{{REQUEST}}", &describe_request(query))
}
