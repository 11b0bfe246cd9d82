//! Outcome wrappers for recipe write operations.

use std::fmt;

use crate::models::Recipe;

/// A recipe that was just stored, shown in full.
pub struct SaveResult<'a> {
    pub recipe: &'a Recipe,
}

impl<'a> SaveResult<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        Self { recipe }
    }
}

impl fmt::Display for SaveResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved recipe with ID: {}", self.recipe.id)?;
        writeln!(f)?;
        write!(f, "{}", self.recipe)
    }
}

/// Confirmation that a recipe was removed.
pub struct DeleteResult {
    pub id: String,
    pub title: String,
}

impl DeleteResult {
    pub fn new(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
        }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted recipe '{}' (ID: {})", self.title, self.id)
    }
}
