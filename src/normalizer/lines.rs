use super::defaults::{
    default_cuisine, default_description, default_title, fill_missing_lists, DEFAULT_COOK_TIME,
    DEFAULT_DIFFICULTY, DEFAULT_PREP_TIME, DEFAULT_SERVINGS,
};
use crate::model::{Recipe, RecipeQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Ingredients,
    Instructions,
}

fn is_ingredients_header(lower: &str) -> bool {
    lower.contains("ingredient") || lower.contains("what you need")
}

fn is_instructions_header(lower: &str) -> bool {
    lower.contains("instruction") || lower.contains("step") || lower.contains("method")
}

/// Heuristic section scan over plain text. Always produces a recipe.
pub(crate) fn parse(text: &str, query: &RecipeQuery) -> Recipe {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let title = lines
        .first()
        .map(|line| line.to_string())
        .unwrap_or_else(|| default_title(query));

    let mut ingredients = Vec::new();
    let mut instructions = Vec::new();
    let mut section = Section::Preamble;

    for line in &lines {
        let lower = line.to_lowercase();

        if is_ingredients_header(&lower) {
            section = Section::Ingredients;
            continue;
        }
        if is_instructions_header(&lower) {
            section = Section::Instructions;
            continue;
        }

        match section {
            Section::Preamble => {}
            Section::Ingredients => ingredients.push(line.to_string()),
            Section::Instructions => instructions.push(line.to_string()),
        }
    }

    fill_missing_lists(query, &mut ingredients, &mut instructions);

    Recipe {
        title,
        description: default_description(query),
        ingredients,
        instructions,
        prep_time: DEFAULT_PREP_TIME.to_string(),
        cook_time: DEFAULT_COOK_TIME.to_string(),
        servings: DEFAULT_SERVINGS.to_string(),
        difficulty: DEFAULT_DIFFICULTY.to_string(),
        cuisine: default_cuisine(query),
    }
}
