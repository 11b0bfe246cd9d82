//! Builder for creating and configuring RecipeLibrary instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::RecipeLibrary;
use crate::{
    db::Database,
    error::{CookingError, Result},
};

/// Builder for creating and configuring RecipeLibrary instances.
#[derive(Debug, Clone)]
pub struct RecipeLibraryBuilder {
    database_path: Option<PathBuf>,
}

impl RecipeLibraryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/remy/recipes.db` or `~/.local/share/remy/recipes.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured library, creating the database file and schema
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns `CookingError::FileSystem` if the database directory cannot be
    /// created, `CookingError::Database` if schema initialization fails
    pub async fn build(self) -> Result<RecipeLibrary> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CookingError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CookingError>(())
        })
        .await
        .map_err(|e| CookingError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::debug!("Recipe library ready at {}", db_path.display());
        Ok(RecipeLibrary::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("remy")
            .place_data_file("recipes.db")
            .map_err(|e| CookingError::XdgDirectory(e.to_string()))
    }
}

impl Default for RecipeLibraryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
