//! Data models for recipes and conversations.
//!
//! This module contains the core domain models of the cooking assistant.
//! Display implementations for these models are located in
//! [`crate::display::models`] to keep data structures separate from
//! presentation.
//!
//! # Lifecycle
//!
//! - [`Recipe`] values are created by the parsing webhook (or imported from
//!   a file), persisted by the recipe library and read-only afterwards.
//! - [`ConversationMessage`] values form an append-only transcript owned by
//!   the step navigator and cleared on every step change.
//! - [`SessionStatus`] is the navigator's state machine value.
//!
//! # Examples
//!
//! ```rust
//! use remy_core::models::{Recipe, RecipeStep};
//!
//! let recipe: Recipe = serde_json::from_str(
//!     r#"{
//!         "title": "Toast",
//!         "total_time": 5,
//!         "source_url": "https://example.com/toast",
//!         "recipe_ingredients": [
//!             { "amount": 2, "unit": "slices", "ingredient": "bread", "aisle": "Bakery" }
//!         ],
//!         "recipe_steps": [
//!             { "step_number": 1, "instruction": "Toast the bread" }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! assert!(recipe.validate().is_ok());
//! assert_eq!(recipe.recipe_ingredients[0].line(), "2 slices bread");
//! ```

pub mod message;
pub mod recipe;
pub mod status;
pub mod summary;


pub use message::{ConversationMessage, MessageSource};
pub use recipe::{Recipe, RecipeIngredient, RecipeStep, DEFAULT_AISLE};
pub use status::SessionStatus;
pub use summary::RecipeSummary;
