//! Recognition of spoken navigation commands.
//!
//! Only transcript lines spoken by the user are inspected. Matching is a
//! case-insensitive substring test against two fixed phrase sets; the
//! "next" set is checked first and wins if a line matches both.

use crate::models::{ConversationMessage, MessageSource};

/// Phrases that advance to the next step.
pub const NEXT_PHRASES: [&str; 3] = ["next step", "go forward", "move forward"];

/// Phrases that return to the previous step.
pub const PREVIOUS_PHRASES: [&str; 4] = ["previous step", "go back", "last step", "move back"];

/// A recognised request to move through the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Next,
    Previous,
}

impl NavigationIntent {
    /// Target index for this intent from `current`, or `None` when it would
    /// leave the recipe (the caller clamps, it never wraps).
    pub fn target(self, current: usize) -> Option<usize> {
        match self {
            NavigationIntent::Next => current.checked_add(1),
            NavigationIntent::Previous => current.checked_sub(1),
        }
    }
}

/// Navigation intent carried by a transcript message, if any.
pub fn interpret(message: &ConversationMessage) -> Option<NavigationIntent> {
    if message.source != MessageSource::User {
        return None;
    }

    let text = message.message.to_lowercase();
    if NEXT_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        Some(NavigationIntent::Next)
    } else if PREVIOUS_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        Some(NavigationIntent::Previous)
    } else {
        None
    }
}
