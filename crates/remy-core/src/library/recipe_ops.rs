//! Recipe operations for the RecipeLibrary.

use log::warn;

use super::RecipeLibrary;
use crate::{
    display::RecipeSummaries,
    error::{CookingError, Result},
    models::Recipe,
};

impl RecipeLibrary {
    /// Validates and stores a recipe, replacing any previous version with
    /// the same ID.
    pub async fn save_recipe(&self, recipe: &Recipe) -> Result<()> {
        recipe.validate()?;
        let recipe = recipe.clone();

        self.with_database(move |db| db.upsert_recipe(&recipe)).await
    }

    /// Retrieves a recipe by ID.
    pub async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>> {
        let id = id.to_string();
        self.with_database(move |db| db.get_recipe(&id)).await
    }

    /// Retrieves a recipe by ID, failing when it does not exist.
    pub async fn require_recipe(&self, id: &str) -> Result<Recipe> {
        self.get_recipe(id)
            .await?
            .ok_or_else(|| CookingError::RecipeNotFound { id: id.to_string() })
    }

    /// Most recently created recipe for a source URL.
    pub async fn latest_recipe_for_url(&self, source_url: &str) -> Result<Option<Recipe>> {
        let source_url = source_url.to_string();
        self.with_database(move |db| db.latest_recipe_for_url(&source_url))
            .await
    }

    /// Lists all recipes ordered by title.
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.with_database(|db| db.list_recipes()).await
    }

    /// Lists recipe summaries ordered by title.
    pub async fn list_recipe_summaries(&self) -> Result<RecipeSummaries> {
        let summaries = self.with_database(|db| db.list_recipe_summaries()).await?;
        Ok(RecipeSummaries(summaries))
    }

    /// Summaries of the recipes offered for selection.
    ///
    /// A read failure is not fatal here: it is logged and the selection is
    /// simply empty.
    pub async fn recipes_for_selection(&self) -> RecipeSummaries {
        match self.list_recipe_summaries().await {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!("Failed to load recipes for selection: {e}");
                RecipeSummaries(Vec::new())
            }
        }
    }

    /// Deletes a recipe by ID.
    pub async fn delete_recipe(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.with_database(move |db| db.delete_recipe(&id)).await
    }
}
