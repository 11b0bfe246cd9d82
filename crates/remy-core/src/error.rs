//! Error types for the cooking assistant library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all cooking assistant operations.
#[derive(Error, Debug)]
pub enum CookingError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Recipe not found for the given ID
    #[error("Recipe with ID {id} not found")]
    RecipeNotFound { id: String },
    /// Recipe structure cannot be navigated (missing or broken steps)
    #[error("Invalid recipe structure: {reason}")]
    InvalidRecipe { reason: String },
    /// Microphone permission denied or audio capture unsupported
    #[error("Microphone unavailable: {message}")]
    MicrophoneUnavailable { message: String },
    /// Voice conversation SDK failures
    #[error("Conversation session error: {message}")]
    Session { message: String },
    /// Recipe parsing webhook or signed-session endpoint failures
    #[error("Gateway error: {message}")]
    Gateway {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// The parsed recipe never appeared in the store
    #[error("Timed out waiting for parsed recipe after {attempts} attempts")]
    ParseTimeout { attempts: u32 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CookingError {
        CookingError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CookingError {
        CookingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CookingError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a gateway error wrapping an HTTP client failure.
    pub fn gateway(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Gateway {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a session error.
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Human-readable message for the error view.
    ///
    /// Unlike `Display`, this never exposes driver-level details of store
    /// failures.
    pub fn user_message(&self) -> String {
        match self {
            CookingError::MicrophoneUnavailable { message } => {
                format!("Microphone access failed: {message}")
            }
            CookingError::Session { message } => format!("Connection error: {message}"),
            CookingError::Database { message, .. } => format!("Recipe storage failed: {message}"),
            CookingError::Gateway { message, .. } => format!("Failed to parse recipe: {message}"),
            CookingError::ParseTimeout { .. } => {
                "The recipe is taking too long to process. Please try again.".to_string()
            }
            CookingError::InvalidRecipe { .. } => {
                "This recipe has no usable steps and cannot be cooked.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CookingError::database(message).with_source(e))
    }
}

/// Result type alias for cooking assistant operations
pub type Result<T> = std::result::Result<T, CookingError>;
