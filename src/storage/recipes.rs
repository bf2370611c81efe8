use tracing::info;

use super::{Collection, KeyValueStore, load_list, save_value};
use crate::error::AppError;
use crate::models::SavedRecipe;

pub fn all<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<SavedRecipe>, AppError> {
    load_list(store, Collection::Recipes)
}

/// Append a recipe. The stored copy is independent of the live catalogue.
pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    recipe: &SavedRecipe,
) -> Result<(), AppError> {
    let mut recipes = all(store)?;
    recipes.push(recipe.clone());
    save_value(store, Collection::Recipes, &recipes)?;
    info!(id = %recipe.id, name = %recipe.name, "saved recipe");
    Ok(())
}

pub fn by_id<S: KeyValueStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Option<SavedRecipe>, AppError> {
    Ok(all(store)?.into_iter().find(|r| r.id == id))
}

/// Remove a recipe; returns whether anything was removed.
pub fn delete<S: KeyValueStore + ?Sized>(store: &mut S, id: &str) -> Result<bool, AppError> {
    let mut recipes = all(store)?;
    let before = recipes.len();
    recipes.retain(|r| r.id != id);
    save_value(store, Collection::Recipes, &recipes)?;
    Ok(recipes.len() != before)
}
