//! Database operations and SQLite management for recipes.
//!
//! This module stands in for the hosted relational backend: it stores
//! recipes with their ordered steps and ingredients, and answers the two
//! queries the application needs (listing by title, most recent match for a
//! source URL).

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod recipe_queries;
pub mod schema;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, mainly for tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
