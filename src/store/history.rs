use chrono::Utc;
use log::{debug, warn};

use super::{KeyValueStore, PENDING_INGREDIENTS_KEY, RECIPES_KEY};
use crate::error::{RecipifyError, Result};
use crate::model::StoredRecipe;

/// How many recipes are kept before the oldest are dropped
pub const MAX_STORED_RECIPES: usize = 20;

const UNNAMED_RECIPE: &str = "Generated Recipe";

/// The user's recipe history on top of any [`KeyValueStore`].
pub struct RecipeHistory<S> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> RecipeHistory<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, MAX_STORED_RECIPES)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        RecipeHistory {
            store,
            capacity: capacity.max(1),
        }
    }

    /// All stored recipes, newest first.
    ///
    /// An unreadable history is treated as empty rather than as an error.
    pub fn list(&self) -> Result<Vec<StoredRecipe>> {
        match self.read() {
            Err(RecipifyError::JsonError(e)) => {
                warn!("Ignoring unreadable recipe history: {}", e);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn read(&self) -> Result<Vec<StoredRecipe>> {
        match self.store.get(RECIPES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// The stored list for a read-modify-write. Unreadable data is an error so
    /// that it is never overwritten.
    fn read_for_update(&self) -> Result<Vec<StoredRecipe>> {
        self.read().map_err(|e| match e {
            RecipifyError::JsonError(e) => {
                RecipifyError::StoreError(format!("recipe history is unreadable: {}", e))
            }
            other => other,
        })
    }

    fn write(&self, recipes: &[StoredRecipe]) -> Result<()> {
        let raw = serde_json::to_string(recipes)?;
        self.store.set(RECIPES_KEY, &raw)
    }

    /// Add a recipe at the front, dropping the oldest past capacity.
    pub fn save(&self, name: &str, ingredients: &str, recipe: &str) -> Result<StoredRecipe> {
        let mut recipes = self.read_for_update()?;
        let now = Utc::now();

        // Millisecond timestamps, bumped past any existing id to stay unique
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let next_free = recipes.iter().map(|r| r.id + 1).max().unwrap_or(0);

        let stored = StoredRecipe {
            id: millis.max(next_free),
            name: name.to_string(),
            ingredients: ingredients.to_string(),
            recipe: recipe.to_string(),
            date_created: now,
            date_viewed: now,
        };

        recipes.insert(0, stored.clone());
        recipes.truncate(self.capacity);
        self.write(&recipes)?;

        debug!("Recipe saved to history: {}", stored.name);
        Ok(stored)
    }

    /// Look up a recipe and mark it as viewed now.
    pub fn view(&self, id: u64) -> Result<Option<StoredRecipe>> {
        let mut recipes = self.read_for_update()?;
        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        recipe.date_viewed = Utc::now();
        let viewed = recipe.clone();
        self.write(&recipes)?;
        Ok(Some(viewed))
    }

    /// Remove a recipe. Returns whether anything was removed.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut recipes = self.read_for_update()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);

        if recipes.len() == before {
            return Ok(false);
        }
        self.write(&recipes)?;
        Ok(true)
    }

    /// Remember ingredients to generate a recipe from later.
    pub fn set_pending_ingredients(&self, ingredients: &str) -> Result<()> {
        self.store.set(PENDING_INGREDIENTS_KEY, ingredients.trim())
    }

    /// Take the remembered ingredients, clearing them.
    pub fn take_pending_ingredients(&self) -> Result<Option<String>> {
        let pending = self.store.get(PENDING_INGREDIENTS_KEY)?;
        if pending.is_some() {
            self.store.remove(PENDING_INGREDIENTS_KEY)?;
        }
        Ok(pending
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()))
    }
}

/// Best guess at a recipe's name from its free-text body.
///
/// Looks at the first five lines for one that is not a markdown heading and
/// not a section label, and strips list markers from it.
pub fn extract_recipe_name(recipe: &str) -> String {
    recipe
        .lines()
        .take(5)
        .map(str::trim)
        .find(|line| {
            let lower = line.to_lowercase();
            !line.is_empty()
                && !line.starts_with('#')
                && !lower.contains("ingredients")
                && !lower.contains("instructions")
                && !lower.contains("time")
        })
        .map(strip_list_marker)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNNAMED_RECIPE.to_string())
}

/// "1. Foo" and "- Foo" / "* Foo" become "Foo".
fn strip_list_marker(line: &str) -> String {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let line = if digits > 0 {
        match line[digits..].strip_prefix('.') {
            Some(rest) => rest.trim_start(),
            None => line,
        }
    } else {
        line
    };

    line.strip_prefix(['-', '*'])
        .map(str::trim_start)
        .unwrap_or(line)
        .to_string()
}
