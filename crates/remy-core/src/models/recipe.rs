//! Recipe model definition and structural validation.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{CookingError, Result};

/// Aisle bucket for ingredients without a category.
pub const DEFAULT_AISLE: &str = "Other";

fn new_recipe_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Represents a parsed recipe with its ingredients and ordered steps.
///
/// Field names follow the JSON produced by the parsing webhook, so a
/// webhook payload deserializes directly. Payloads without an `id` or
/// `created_at` get a fresh UUID and the current time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Unique identifier for the recipe
    #[serde(default = "new_recipe_id")]
    pub id: String,

    /// Title of the recipe
    pub title: String,

    /// Total cook time in minutes
    #[serde(default)]
    pub total_time: u32,

    /// URL the recipe was parsed from
    #[serde(default)]
    pub source_url: String,

    /// Timestamp when the recipe was stored (UTC)
    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,

    /// Ingredients, unordered
    #[serde(default)]
    pub recipe_ingredients: Vec<RecipeIngredient>,

    /// Steps, ordered by `step_number`
    #[serde(default)]
    pub recipe_steps: Vec<RecipeStep>,
}

/// A single instruction within a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeStep {
    /// 1-based position of the step
    pub step_number: u32,

    /// Instruction text
    pub instruction: String,
}

/// An ingredient line: amount, unit and name, plus a display aisle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    /// Quantity of the ingredient
    #[serde(default)]
    pub amount: f64,

    /// Unit for the amount (may be empty, e.g. "2 eggs")
    #[serde(default)]
    pub unit: String,

    /// Ingredient name
    pub ingredient: String,

    /// Aisle category used only for grouping on display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
}

impl RecipeIngredient {
    /// The aisle this ingredient is grouped under.
    pub fn aisle_or_default(&self) -> &str {
        match self.aisle.as_deref().map(str::trim) {
            Some(aisle) if !aisle.is_empty() => aisle,
            _ => DEFAULT_AISLE,
        }
    }

    /// `amount unit name` with the unit omitted when empty.
    pub fn line(&self) -> String {
        if self.unit.trim().is_empty() {
            format!("{} {}", self.amount, self.ingredient)
        } else {
            format!("{} {} {}", self.amount, self.unit, self.ingredient)
        }
    }
}

impl Recipe {
    /// Number of steps in the recipe.
    pub fn step_count(&self) -> usize {
        self.recipe_steps.len()
    }

    /// Step at a 0-based index.
    pub fn step(&self, index: usize) -> Option<&RecipeStep> {
        self.recipe_steps.get(index)
    }

    /// Checks that the recipe can be navigated step by step.
    ///
    /// Steps must be non-empty, numbered `1..=N` without gaps or duplicates
    /// (in any stored order) and carry a non-blank instruction.
    pub fn validate(&self) -> Result<()> {
        if self.recipe_steps.is_empty() {
            return Err(CookingError::InvalidRecipe {
                reason: format!("recipe '{}' has no steps", self.title),
            });
        }

        let mut numbers: Vec<u32> = self.recipe_steps.iter().map(|s| s.step_number).collect();
        numbers.sort_unstable();
        for (index, number) in numbers.iter().enumerate() {
            if *number as usize != index + 1 {
                return Err(CookingError::InvalidRecipe {
                    reason: format!(
                        "recipe '{}' step numbers are not contiguous from 1 (found {number} at position {})",
                        self.title,
                        index + 1
                    ),
                });
            }
        }

        if let Some(step) = self
            .recipe_steps
            .iter()
            .find(|s| s.instruction.trim().is_empty())
        {
            return Err(CookingError::InvalidRecipe {
                reason: format!("step {} has no instruction", step.step_number),
            });
        }

        Ok(())
    }

    /// Returns the recipe with steps sorted by `step_number`.
    pub fn ordered(mut self) -> Self {
        self.recipe_steps.sort_by_key(|s| s.step_number);
        self
    }

    /// Groups ingredients by aisle, in order of each aisle's first
    /// appearance. Ingredients without an aisle land in [`DEFAULT_AISLE`].
    pub fn ingredients_by_aisle(&self) -> Vec<(&str, Vec<&RecipeIngredient>)> {
        let mut groups: Vec<(&str, Vec<&RecipeIngredient>)> = Vec::new();
        for ingredient in &self.recipe_ingredients {
            let aisle = ingredient.aisle_or_default();
            match groups.iter_mut().find(|(name, _)| *name == aisle) {
                Some((_, items)) => items.push(ingredient),
                None => groups.push((aisle, vec![ingredient])),
            }
        }
        groups
    }
}
