//! Local persistence for generated recipes.
//!
//! Recipes live in a plain string key-value store, the same way a browser
//! keeps them in local storage: one key holds the JSON-encoded history list,
//! another a pending ingredient string handed from one step to the next.

mod file;
mod history;
mod memory;

pub use file::FileStore;
pub use history::{extract_recipe_name, RecipeHistory, MAX_STORED_RECIPES};
pub use memory::MemoryStore;

use crate::error::Result;

/// Key holding the JSON array of stored recipes, newest first
pub const RECIPES_KEY: &str = "userRecipes";
/// Key holding the ingredient string waiting to be turned into a recipe
pub const PENDING_INGREDIENTS_KEY: &str = "userIngredients";

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
