//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{ConversationMessage, RecipeSummary};

/// Newtype wrapper for displaying recipe listings.
///
/// # Examples
///
/// ```rust
/// use remy_core::display::RecipeSummaries;
///
/// let summaries = RecipeSummaries(vec![]);
/// assert_eq!(summaries.to_string(), "No recipes found.\n");
/// ```
pub struct RecipeSummaries(pub Vec<RecipeSummary>);

impl RecipeSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&RecipeSummary> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecipeSummary> {
        self.0.iter()
    }
}

impl Index<usize> for RecipeSummaries {
    type Output = RecipeSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for RecipeSummaries {
    type Item = RecipeSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecipeSummaries {
    type Item = &'a RecipeSummary;
    type IntoIter = std::slice::Iter<'a, RecipeSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RecipeSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No recipes found.")
        } else {
            for recipe in &self.0 {
                write!(f, "{recipe}")?;
            }
            Ok(())
        }
    }
}

/// The conversation transcript of the current step.
pub struct Transcript<'a>(pub &'a [ConversationMessage]);

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "_Nothing said yet._");
        }
        for message in self.0 {
            write!(f, "{message}")?;
        }
        Ok(())
    }
}
