//! High-level recipe library API.
//!
//! [`RecipeLibrary`] is the recipe repository client: the async facade over
//! the SQLite [`Database`](crate::db::Database). Every call opens the
//! database inside `tokio::task::spawn_blocking`, so the async callers (the
//! recipe loader, the HTTP server, the interactive session) never block the
//! runtime on SQLite.
//!
//! The [`RecipeStore`] trait is the seam the polling loop and the recipe
//! loader depend on, which lets tests substitute scripted stores.
//!
//! # Usage
//!
//! ```rust
//! use remy_core::RecipeLibraryBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = RecipeLibraryBuilder::new()
//!     .with_database_path(Some("recipes.db"))
//!     .build()
//!     .await?;
//!
//! for summary in &library.recipes_for_selection().await {
//!     println!("{}", summary.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::task;

use crate::{
    db::Database,
    error::{CookingError, Result},
    models::Recipe,
};

pub mod builder;
pub mod recipe_ops;


pub use builder::RecipeLibraryBuilder;

/// Read/write access to stored recipes, as needed by the loading flow.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Most recently created recipe parsed from `source_url`, if any.
    async fn find_latest_by_url(&self, source_url: &str) -> Result<Option<Recipe>>;

    /// Inserts or replaces a fully-formed recipe.
    async fn save_recipe(&self, recipe: &Recipe) -> Result<()>;
}

/// Recipe repository backed by a SQLite file.
#[derive(Debug, Clone)]
pub struct RecipeLibrary {
    pub(crate) db_path: PathBuf,
}

impl RecipeLibrary {
    /// Creates a new library with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs a database operation on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| CookingError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

#[async_trait]
impl RecipeStore for RecipeLibrary {
    async fn find_latest_by_url(&self, source_url: &str) -> Result<Option<Recipe>> {
        self.latest_recipe_for_url(source_url).await
    }

    async fn save_recipe(&self, recipe: &Recipe) -> Result<()> {
        RecipeLibrary::save_recipe(self, recipe).await
    }
}
