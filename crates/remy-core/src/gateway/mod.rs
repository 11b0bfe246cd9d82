//! Recipe parsing gateway.
//!
//! A recipe URL is submitted to an external webhook which turns the page
//! into a structured [`Recipe`]. Depending on the deployment the webhook
//! answers with the full recipe, with a reference ID, or with a bare
//! acknowledgement while it writes the recipe to the store in the
//! background. [`RecipeLoader`] hides these variants behind one flow:
//! persist a direct answer, otherwise poll the store by URL.
//!
//! ```text
//! URL ──▶ validate ──▶ RecipeParser::submit ──┬─ Parsed(recipe) ──▶ save ──▶ Recipe
//!                                             └─ Reference/Accepted ──▶ poll store ──▶ Recipe
//! ```

use async_trait::async_trait;
use url::Url;

use crate::{
    error::{CookingError, Result},
    models::Recipe,
};

pub mod loader;
pub mod poll;
pub mod webhook;

pub use loader::RecipeLoader;
pub use poll::{poll_for_recipe, PollConfig};
pub use webhook::WebhookClient;

/// What the parsing webhook answered for a submitted URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The webhook returned the structured recipe directly
    Parsed(Recipe),
    /// The webhook returned the ID of a recipe it is writing to the store
    Reference(String),
    /// The webhook acknowledged the request without a payload
    Accepted,
}

/// Submits recipe URLs for parsing.
#[async_trait]
pub trait RecipeParser: Send + Sync {
    async fn submit(&self, url: &str) -> Result<ParseOutcome>;
}

/// Checks that `raw` is an absolute http(s) URL and returns it trimmed.
///
/// The trimmed input, not a normalized form, is what gets submitted and
/// later matched against `source_url` in the store.
pub fn validate_recipe_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CookingError::invalid_input("url").with_reason("URL is required"));
    }

    let parsed = Url::parse(trimmed).map_err(|e| {
        CookingError::invalid_input("url").with_reason(format!("'{trimmed}' is not a valid URL: {e}"))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(CookingError::invalid_input("url")
            .with_reason(format!("unsupported URL scheme '{scheme}'"))),
    }
}
