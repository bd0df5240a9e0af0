use log::debug;
use serde_json::{Map, Value};

use super::defaults::{
    default_cuisine, default_description, default_title, fill_missing_lists, DEFAULT_COOK_TIME,
    DEFAULT_DIFFICULTY, DEFAULT_PREP_TIME, DEFAULT_SERVINGS,
};
use crate::model::{Recipe, RecipeQuery};

/// Slice from the first `{` to the last `}`, if there is one.
pub(crate) fn find_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Try to read the embedded JSON object. `None` means "no structured match".
pub(crate) fn parse(text: &str, query: &RecipeQuery) -> Option<Recipe> {
    let candidate = find_json_object(text)?;

    // Decoded as a plain map so a repeated key keeps its last value and a
    // wrongly-typed field only loses that field.
    let raw: Map<String, Value> = match serde_json::from_str(candidate) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Embedded recipe JSON did not decode: {}", e);
            return None;
        }
    };

    let mut ingredients = string_list(raw.get("ingredients"));
    let mut instructions = string_list(raw.get("instructions"));
    fill_missing_lists(query, &mut ingredients, &mut instructions);

    Some(Recipe {
        title: string_or(raw.get("title"), || default_title(query)),
        description: string_or(raw.get("description"), || default_description(query)),
        ingredients,
        instructions,
        prep_time: string_or(raw.get("prepTime"), || DEFAULT_PREP_TIME.to_string()),
        cook_time: string_or(raw.get("cookTime"), || DEFAULT_COOK_TIME.to_string()),
        servings: string_or(raw.get("servings"), || DEFAULT_SERVINGS.to_string()),
        difficulty: string_or(raw.get("difficulty"), || DEFAULT_DIFFICULTY.to_string()),
        cuisine: string_or(raw.get("cuisine"), || default_cuisine(query)),
    })
}

fn string_or(value: Option<&Value>, default: impl FnOnce() -> String) -> String {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
        .unwrap_or_else(default)
}

/// String entries of a JSON array; anything that is not an array yields nothing.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> RecipeQuery {
        RecipeQuery::new("rice, tomato").unwrap()
    }

    #[test]
    fn test_find_json_object_is_greedy() {
        let text = "Here you go: {\"a\": {\"b\": 1}} and {\"c\": 2} enjoy";
        assert_eq!(
            find_json_object(text),
            Some("{\"a\": {\"b\": 1}} and {\"c\": 2}")
        );
    }

    #[test]
    fn test_find_json_object_needs_both_braces() {
        assert_eq!(find_json_object("no braces"), None);
        assert_eq!(find_json_object("only { open"), None);
        assert_eq!(find_json_object("} backwards {"), None);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(parse("{ title: not json }", &query()).is_none());
    }

    #[test]
    fn test_parse_code_fenced_json() {
        let text = "```json\n{\"title\": \"Fenced\", \"ingredients\": [\"rice\"]}\n```";
        let recipe = parse(text, &query()).unwrap();
        assert_eq!(recipe.title, "Fenced");
        assert_eq!(recipe.ingredients, vec!["rice"]);
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let text = r#"{"title": 42, "ingredients": "rice and tomato", "servings": 4, "instructions": ["cook", 7]}"#;
        let recipe = parse(text, &query()).unwrap();

        assert_eq!(recipe.title, "Delicious Recipe");
        assert_eq!(recipe.ingredients, vec!["1 cup rice"]);
        assert_eq!(recipe.servings, "2-4");
        assert_eq!(recipe.instructions, vec!["cook"]);
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let text = r#"{"title": "Draft", "ingredients": ["rice", "tomato"], "prepTime": "5 minutes", "title": "Tomato Rice"}"#;
        let recipe = parse(text, &query()).unwrap();

        assert_eq!(recipe.title, "Tomato Rice");
        assert_eq!(recipe.ingredients, vec!["rice", "tomato"]);
        assert_eq!(recipe.prep_time, "5 minutes");
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let text = r#"{"title": "  ", "difficulty": ""}"#;
        let recipe = parse(text, &query()).unwrap();
        assert_eq!(recipe.title, "Delicious Recipe");
        assert_eq!(recipe.difficulty, "Easy");
    }
}
