use html_escape::encode_text;

use crate::model::Recipe;

/// Anything that can present a recipe to the user.
pub trait RecipeRenderer {
    fn render(&self, recipe: &Recipe) -> String;
}

/// HTML fragment in the layout of the recipe page. All recipe text is escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

/// Plain text for terminals.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl RecipeRenderer for HtmlRenderer {
    fn render(&self, recipe: &Recipe) -> String {
        let meta = [
            ("clock", "Prep", &recipe.prep_time),
            ("fire", "Cook", &recipe.cook_time),
            ("users", "Serves", &recipe.servings),
            ("star", "Difficulty", &recipe.difficulty),
            ("globe", "Cuisine", &recipe.cuisine),
        ]
        .iter()
        .map(|(icon, label, value)| {
            format!(
                "<div class=\"meta-item\"><i class=\"fas fa-{}\"></i><span>{}: {}</span></div>",
                icon,
                label,
                encode_text(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

        format!(
            r#"<div class="recipe-display">
<div class="recipe-header-info">
<h1 class="recipe-title">{title}</h1>
<p class="recipe-description">{description}</p>
<div class="recipe-meta">
{meta}
</div>
</div>
<div class="recipe-sections">
<div class="recipe-section">
<h3><i class="fas fa-list"></i> Ingredients</h3>
<ul class="ingredients-list">{ingredients}</ul>
</div>
<div class="recipe-section">
<h3><i class="fas fa-utensils"></i> Instructions</h3>
<ol class="instructions-list">{instructions}</ol>
</div>
</div>
</div>"#,
            title = encode_text(&recipe.title),
            description = encode_text(&recipe.description),
            meta = meta,
            ingredients = list_items(&recipe.ingredients),
            instructions = list_items(&recipe.instructions),
        )
    }
}

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", encode_text(item)))
        .collect()
}

impl RecipeRenderer for TextRenderer {
    fn render(&self, recipe: &Recipe) -> String {
        let mut out = String::new();

        out.push_str(&recipe.title);
        out.push('\n');
        out.push_str(&"=".repeat(recipe.title.chars().count()));
        out.push_str("\n\n");
        out.push_str(&recipe.description);
        out.push_str("\n\n");
        out.push_str(&format!(
            "Prep: {} | Cook: {} | Serves: {} | Difficulty: {} | Cuisine: {}\n\n",
            recipe.prep_time, recipe.cook_time, recipe.servings, recipe.difficulty, recipe.cuisine
        ));

        out.push_str("Ingredients\n");
        for ingredient in &recipe.ingredients {
            out.push_str(&format!("  - {}\n", ingredient));
        }

        out.push_str("\nInstructions\n");
        for (i, step) in recipe.instructions.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }

        out
    }
}

/// Raw recipe text as HTML paragraphs: blank lines split paragraphs, single
/// newlines become `<br>`.
pub fn format_recipe_content(content: &str) -> String {
    let escaped = encode_text(content).replace("\r\n", "\n");
    format!(
        "<p>{}</p>",
        escaped.replace("\n\n", "</p><p>").replace('\n', "<br>")
    )
}
