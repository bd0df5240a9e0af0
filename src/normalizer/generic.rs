use super::defaults::{
    default_cuisine, title_prefix, DEFAULT_COOK_TIME, DEFAULT_DIFFICULTY, DEFAULT_PREP_TIME,
    DEFAULT_SERVINGS,
};
use crate::model::{Recipe, RecipeQuery};

const PANTRY_STAPLES: [&str; 4] = [
    "2 tbsp olive oil",
    "Salt and pepper to taste",
    "1 onion, diced",
    "2 cloves garlic, minced",
];

/// A complete recipe built from the query alone, for when the model could not
/// be reached at all.
pub fn generic_recipe(query: &RecipeQuery) -> Recipe {
    let first = query.first_ingredient();

    let ingredients = query
        .ingredient_list()
        .into_iter()
        .map(|ingredient| format!("1 cup {ingredient}"))
        .chain(PANTRY_STAPLES.iter().map(|s| s.to_string()))
        .collect();

    let instructions = vec![
        "Prepare all your ingredients by washing and chopping as needed.".to_string(),
        "Heat oil in a large pan over medium heat.".to_string(),
        "Add diced onion and garlic, sauté until fragrant.".to_string(),
        format!("Add {first} and cook for 5-7 minutes."),
        "Season with salt and pepper to taste.".to_string(),
        "Add remaining ingredients and cook until everything is tender.".to_string(),
        "Serve hot and enjoy your delicious creation!".to_string(),
    ];

    Recipe {
        title: format!("{} {} Recipe", title_prefix(query), first),
        description: format!(
            "A creative recipe using your available ingredients: {}",
            query.ingredients()
        ),
        ingredients,
        instructions,
        prep_time: DEFAULT_PREP_TIME.to_string(),
        cook_time: DEFAULT_COOK_TIME.to_string(),
        servings: DEFAULT_SERVINGS.to_string(),
        difficulty: DEFAULT_DIFFICULTY.to_string(),
        cuisine: default_cuisine(query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_recipe() {
        let query = RecipeQuery::new("chicken, rice")
            .unwrap()
            .with_cuisine(Some("mexican"));
        let recipe = generic_recipe(&query);

        assert_eq!(recipe.title, "Mexican chicken Recipe");
        assert_eq!(
            recipe.ingredients,
            vec![
                "1 cup chicken",
                "1 cup rice",
                "2 tbsp olive oil",
                "Salt and pepper to taste",
                "1 onion, diced",
                "2 cloves garlic, minced",
            ]
        );
        assert_eq!(recipe.instructions.len(), 7);
        assert_eq!(recipe.instructions[3], "Add chicken and cook for 5-7 minutes.");
        assert_eq!(recipe.cuisine, "mexican");
    }

    #[test]
    fn test_generic_recipe_without_cuisine() {
        let query = RecipeQuery::new("kale").unwrap();
        let recipe = generic_recipe(&query);

        assert_eq!(recipe.title, "Delicious kale Recipe");
        assert_eq!(
            recipe.description,
            "A creative recipe using your available ingredients: kale"
        );
        assert_eq!(recipe.cuisine, "International");
        assert_eq!(recipe.ingredients.len(), 5);
    }
}
