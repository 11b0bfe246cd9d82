//! The URL-to-recipe loading flow.

use log::info;

use super::{poll_for_recipe, validate_recipe_url, ParseOutcome, PollConfig, RecipeParser};
use crate::{error::Result, library::RecipeStore, models::Recipe};

/// Turns a recipe URL into a stored, navigable recipe.
///
/// The returned future performs no work after it is dropped, so a caller
/// that goes away mid-poll abandons the flow without side effects.
pub struct RecipeLoader<P, S> {
    parser: P,
    store: S,
    poll: PollConfig,
}

impl<P, S> RecipeLoader<P, S>
where
    P: RecipeParser,
    S: RecipeStore,
{
    pub fn new(parser: P, store: S, poll: PollConfig) -> Self {
        Self {
            parser,
            store,
            poll,
        }
    }

    /// Submit `url` for parsing and return the resulting recipe.
    ///
    /// A recipe returned directly by the webhook is validated and saved; a
    /// failed save is an error, since the recipe would otherwise be lost.
    /// Any other answer falls back to polling the store by URL.
    pub async fn load(&self, url: &str) -> Result<Recipe> {
        let url = validate_recipe_url(url)?;

        match self.parser.submit(&url).await? {
            ParseOutcome::Parsed(recipe) => {
                recipe.validate()?;
                let recipe = recipe.ordered();
                self.store.save_recipe(&recipe).await?;
                info!("Saved parsed recipe '{}' ({})", recipe.title, recipe.id);
                Ok(recipe)
            }
            ParseOutcome::Reference(id) => {
                info!("Recipe webhook is writing recipe {id}; waiting for it");
                poll_for_recipe(&self.store, &url, &self.poll).await
            }
            ParseOutcome::Accepted => {
                info!("Recipe webhook accepted {url}; waiting for it");
                poll_for_recipe(&self.store, &url, &self.poll).await
            }
        }
    }
}
