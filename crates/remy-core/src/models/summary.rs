//! Recipe summary types for listings.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Recipe;

/// Summary information about a stored recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    /// Recipe ID
    pub id: String,
    /// Title of the recipe
    pub title: String,
    /// Total cook time in minutes
    pub total_time: u32,
    /// URL the recipe was parsed from
    pub source_url: String,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Number of steps
    pub total_steps: u32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            total_time: recipe.total_time,
            source_url: recipe.source_url.clone(),
            created_at: recipe.created_at,
            total_steps: recipe.recipe_steps.len() as u32,
        }
    }
}
