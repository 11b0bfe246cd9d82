//! The card shown for the step being cooked.

use std::fmt;

use crate::models::{Recipe, RecipeStep};

/// One step of a recipe with its position, e.g. "Step 2 of 5".
pub struct StepCard<'a> {
    pub recipe: &'a Recipe,
    pub index: usize,
}

impl<'a> StepCard<'a> {
    pub fn new(recipe: &'a Recipe, index: usize) -> Self {
        Self { recipe, index }
    }

    fn step(&self) -> Option<&'a RecipeStep> {
        self.recipe.step(self.index)
    }
}

impl fmt::Display for StepCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.recipe.step_count();
        writeln!(f, "## {}", self.recipe.title)?;
        writeln!(f)?;
        writeln!(f, "**Step {} of {total}**", self.index + 1)?;
        writeln!(f)?;
        match self.step() {
            Some(step) => writeln!(f, "{}", step.instruction)?,
            None => writeln!(f, "_No such step._")?,
        }

        let mut hints = Vec::new();
        if self.index > 0 {
            hints.push("say \"go back\"");
        }
        if self.index + 1 < total {
            hints.push("say \"next step\"");
        }
        if !hints.is_empty() {
            writeln!(f)?;
            writeln!(f, "_{}_", hints.join(" or "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: "r".to_string(),
            title: "Pancakes".to_string(),
            total_time: 20,
            source_url: String::new(),
            created_at: jiff::Timestamp::UNIX_EPOCH,
            recipe_ingredients: Vec::new(),
            recipe_steps: (1..=3)
                .map(|n| RecipeStep {
                    step_number: n,
                    instruction: format!("Instruction {n}"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_step_card_position() {
        let recipe = recipe();
        let output = StepCard::new(&recipe, 1).to_string();
        assert!(output.contains("**Step 2 of 3**"));
        assert!(output.contains("Instruction 2"));
        assert!(output.contains("go back"));
        assert!(output.contains("next step"));
    }

    #[test]
    fn test_step_card_boundaries() {
        let recipe = recipe();
        let first = StepCard::new(&recipe, 0).to_string();
        assert!(!first.contains("go back"));

        let last = StepCard::new(&recipe, 2).to_string();
        assert!(!last.contains("next step"));
    }
}
