//! Core library for the Remy cooking assistant.
//!
//! Remy guides a cook through a recipe one step at a time while a voice
//! agent narrates the current step and listens for spoken navigation
//! commands ("next step", "go back").
//!
//! The crate is organised leaf-first:
//!
//! - [`db`] and [`library`]: recipe storage in SQLite behind an async
//!   facade
//! - [`gateway`]: submitting recipe URLs to the parsing webhook and polling
//!   the library for the result
//! - [`session`]: the voice SDK seam and the sequential session manager
//! - [`interpreter`]: spoken command recognition
//! - [`context`]: the per-step context handed to the voice agent
//! - [`controller`]: the step navigator tying it all together
//! - [`display`]: markdown formatting of everything above
//!
//! # Quick Start
//!
//! ```rust
//! use remy_core::{RecipeLibraryBuilder, models::Recipe};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = RecipeLibraryBuilder::new()
//!     .with_database_path(Some("recipes.db"))
//!     .build()
//!     .await?;
//!
//! let recipe: Recipe = serde_json::from_str(
//!     r#"{"title": "Toast", "recipe_steps": [{"step_number": 1, "instruction": "Toast"}]}"#,
//! )?;
//! library.save_recipe(&recipe).await?;
//!
//! for summary in &library.list_recipe_summaries().await? {
//!     println!("{} ({} steps)", summary.title, summary.total_steps);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod controller;
pub mod db;
pub mod display;
pub mod error;
pub mod gateway;
pub mod interpreter;
pub mod library;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use config::AssistantConfig;
pub use context::{derive_context, ContextVariables};
pub use controller::{NavigationState, StepNavigator, ViewState};
pub use db::Database;
pub use display::{
    DeleteResult, LocalDateTime, OperationStatus, RecipeSummaries, SaveResult, StepCard,
    Transcript,
};
pub use error::{CookingError, Result};
pub use gateway::{
    poll_for_recipe, ParseOutcome, PollConfig, RecipeLoader, RecipeParser, WebhookClient,
};
pub use interpreter::{interpret, NavigationIntent};
pub use library::{RecipeLibrary, RecipeLibraryBuilder, RecipeStore};
pub use models::{
    ConversationMessage, MessageSource, Recipe, RecipeIngredient, RecipeStep, RecipeSummary,
    SessionStatus,
};
pub use session::{
    EventSink, SessionEvent, SessionManager, SessionRequest, SignedUrlClient, VoiceConversation,
};
