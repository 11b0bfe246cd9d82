//! Recipe CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{CookingError, DatabaseResultExt, Result},
    models::{Recipe, RecipeIngredient, RecipeStep, RecipeSummary},
};

const UPSERT_RECIPE_SQL: &str = "INSERT INTO recipes (id, title, total_time, source_url, created_at) VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(id) DO UPDATE SET title = excluded.title, total_time = excluded.total_time, \
     source_url = excluded.source_url, created_at = excluded.created_at";
const DELETE_RECIPE_STEPS_SQL: &str = "DELETE FROM recipe_steps WHERE recipe_id = ?1";
const DELETE_RECIPE_INGREDIENTS_SQL: &str = "DELETE FROM recipe_ingredients WHERE recipe_id = ?1";
const INSERT_STEP_SQL: &str =
    "INSERT INTO recipe_steps (recipe_id, step_number, instruction) VALUES (?1, ?2, ?3)";
const INSERT_INGREDIENT_SQL: &str = "INSERT INTO recipe_ingredients (recipe_id, position, ingredient, amount, unit, aisle) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_RECIPE_SQL: &str =
    "SELECT id, title, total_time, source_url, created_at FROM recipes WHERE id = ?1";
const SELECT_RECIPES_SQL: &str = "SELECT id, title, total_time, source_url, created_at FROM recipes ORDER BY title COLLATE NOCASE, id";
const SELECT_RECIPE_SUMMARIES_SQL: &str = "SELECT r.id, r.title, r.total_time, r.source_url, r.created_at, \
     (SELECT COUNT(*) FROM recipe_steps s WHERE s.recipe_id = r.id) \
     FROM recipes r ORDER BY r.title COLLATE NOCASE, r.id";
const SELECT_RECIPES_BY_URL_SQL: &str =
    "SELECT id, created_at FROM recipes WHERE source_url = ?1";
const SELECT_STEPS_SQL: &str = "SELECT step_number, instruction FROM recipe_steps WHERE recipe_id = ?1 ORDER BY step_number";
const SELECT_INGREDIENTS_SQL: &str = "SELECT ingredient, amount, unit, aisle FROM recipe_ingredients WHERE recipe_id = ?1 ORDER BY position";
const DELETE_RECIPE_SQL: &str = "DELETE FROM recipes WHERE id = ?1";

fn parse_timestamp(value: String, column: usize) -> rusqlite::Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn column_u32(row: &rusqlite::Row, column: usize) -> rusqlite::Result<u32> {
    let value: i64 = row.get(column)?;
    u32::try_from(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(e))
    })
}

impl super::Database {
    /// Helper function to construct a Recipe header (without children) from
    /// a database row.
    fn build_recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        Ok(Recipe {
            id: row.get(0)?,
            title: row.get(1)?,
            total_time: column_u32(row, 2)?,
            source_url: row.get(3)?,
            created_at: parse_timestamp(row.get(4)?, 4)?,
            recipe_ingredients: Vec::new(),
            recipe_steps: Vec::new(),
        })
    }

    /// Inserts or replaces a fully-formed recipe, including its steps and
    /// ingredients, in a single transaction.
    ///
    /// Steps and ingredients of an existing recipe are replaced wholesale.
    pub fn upsert_recipe(&mut self, recipe: &Recipe) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_RECIPE_SQL,
            params![
                recipe.id,
                recipe.title,
                recipe.total_time as i64,
                recipe.source_url,
                recipe.created_at.to_string()
            ],
        )
        .db_context("Failed to save recipe")?;

        tx.execute(DELETE_RECIPE_STEPS_SQL, params![recipe.id])
            .db_context("Failed to clear recipe steps")?;
        tx.execute(DELETE_RECIPE_INGREDIENTS_SQL, params![recipe.id])
            .db_context("Failed to clear recipe ingredients")?;

        for step in &recipe.recipe_steps {
            tx.execute(
                INSERT_STEP_SQL,
                params![recipe.id, step.step_number as i64, step.instruction],
            )
            .db_context("Failed to save recipe step")?;
        }

        for (position, ingredient) in recipe.recipe_ingredients.iter().enumerate() {
            tx.execute(
                INSERT_INGREDIENT_SQL,
                params![
                    recipe.id,
                    position as i64,
                    ingredient.ingredient,
                    ingredient.amount,
                    ingredient.unit,
                    ingredient.aisle
                ],
            )
            .db_context("Failed to save recipe ingredient")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Retrieves a recipe with its steps and ingredients by ID.
    pub fn get_recipe(&self, id: &str) -> Result<Option<Recipe>> {
        let mut recipe = self
            .connection
            .query_row(SELECT_RECIPE_SQL, params![id], Self::build_recipe_from_row)
            .optional()
            .db_context("Failed to query recipe")?;

        if let Some(ref mut recipe) = recipe {
            self.load_children(recipe)?;
        }

        Ok(recipe)
    }

    /// Retrieves the most recently created recipe parsed from `source_url`.
    pub fn latest_recipe_for_url(&self, source_url: &str) -> Result<Option<Recipe>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_RECIPES_BY_URL_SQL)
            .db_context("Failed to prepare query")?;

        // Timestamps are compared parsed; their text form is not fixed-width
        let candidates = stmt
            .query_map(params![source_url], |row| {
                Ok((row.get::<_, String>(0)?, parse_timestamp(row.get(1)?, 1)?))
            })
            .db_context("Failed to query recipes by URL")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch recipes by URL")?;

        match candidates.into_iter().max_by_key(|(_, created_at)| *created_at) {
            Some((id, _)) => self.get_recipe(&id),
            None => Ok(None),
        }
    }

    /// Lists all recipes ordered by title, with steps and ingredients.
    pub fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_RECIPES_SQL)
            .db_context("Failed to prepare query")?;

        let mut recipes = stmt
            .query_map([], Self::build_recipe_from_row)
            .db_context("Failed to query recipes")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch recipes")?;

        for recipe in &mut recipes {
            self.load_children(recipe)?;
        }

        Ok(recipes)
    }

    /// Lists lightweight recipe summaries ordered by title.
    pub fn list_recipe_summaries(&self) -> Result<Vec<RecipeSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_RECIPE_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(RecipeSummary {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    total_time: column_u32(row, 2)?,
                    source_url: row.get(3)?,
                    created_at: parse_timestamp(row.get(4)?, 4)?,
                    total_steps: column_u32(row, 5)?,
                })
            })
            .db_context("Failed to query recipe summaries")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch recipe summaries")?;

        Ok(summaries)
    }

    /// Deletes a recipe together with its steps and ingredients.
    pub fn delete_recipe(&mut self, id: &str) -> Result<()> {
        let affected = self
            .connection
            .execute(DELETE_RECIPE_SQL, params![id])
            .db_context("Failed to delete recipe")?;

        if affected == 0 {
            return Err(CookingError::RecipeNotFound { id: id.to_string() });
        }

        Ok(())
    }

    fn load_children(&self, recipe: &mut Recipe) -> Result<()> {
        let mut steps = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare query")?;
        recipe.recipe_steps = steps
            .query_map(params![recipe.id], |row| {
                Ok(RecipeStep {
                    step_number: column_u32(row, 0)?,
                    instruction: row.get(1)?,
                })
            })
            .db_context("Failed to query recipe steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch recipe steps")?;

        let mut ingredients = self
            .connection
            .prepare(SELECT_INGREDIENTS_SQL)
            .db_context("Failed to prepare query")?;
        recipe.recipe_ingredients = ingredients
            .query_map(params![recipe.id], |row| {
                Ok(RecipeIngredient {
                    ingredient: row.get(0)?,
                    amount: row.get(1)?,
                    unit: row.get(2)?,
                    aisle: row.get(3)?,
                })
            })
            .db_context("Failed to query recipe ingredients")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch recipe ingredients")?;

        Ok(())
    }
}
