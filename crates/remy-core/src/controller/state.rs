//! Navigation state owned by the step navigator and the views derived from it.

use serde::Serialize;

use crate::models::{Recipe, SessionStatus};

/// The navigator's owned state.
///
/// `current_step_index` is 0-based and always within the active recipe's
/// steps; it is 0 when no recipe is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavigationState {
    pub current_step_index: usize,
    pub status: SessionStatus,
    pub active_recipe: Option<Recipe>,
}

impl NavigationState {
    /// Fresh state for a newly selected recipe.
    pub(crate) fn ready(recipe: Recipe) -> Self {
        Self {
            current_step_index: 0,
            status: SessionStatus::Ready,
            active_recipe: Some(recipe),
        }
    }

    pub fn step_count(&self) -> usize {
        self.active_recipe
            .as_ref()
            .map(Recipe::step_count)
            .unwrap_or_default()
    }

    /// The screen to show. A pure function of the state.
    pub fn view(&self) -> ViewState {
        match (&self.status, &self.active_recipe) {
            (SessionStatus::Error { message }, _) => ViewState::Error {
                message: message.clone(),
            },
            (_, None) | (SessionStatus::Idle, _) => ViewState::RecipeSelection,
            (SessionStatus::Ready, Some(_)) | (SessionStatus::Disconnected, Some(_)) => {
                ViewState::Overview
            }
            (SessionStatus::Connecting, Some(_)) => ViewState::Starting,
            (SessionStatus::Connected, Some(_)) => ViewState::Cooking {
                step_index: self.current_step_index,
            },
        }
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    /// Pick or add a recipe
    RecipeSelection,
    /// Recipe details with a start button
    Overview,
    /// Waiting for the voice session to connect
    Starting,
    /// Guided cooking on the given step
    Cooking { step_index: usize },
    /// A failure the user must acknowledge with a retry
    Error { message: String },
}
