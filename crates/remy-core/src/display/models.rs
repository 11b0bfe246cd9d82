//! Display implementations for domain models.
//!
//! Kept apart from the model definitions; all output is markdown.

use std::fmt;

use super::datetime::{LocalDateTime, Minutes};
use crate::models::{ConversationMessage, MessageSource, Recipe, RecipeSummary, SessionStatus};

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Error { message } => write!(f, "error: {message}"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl fmt::Display for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ConversationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = match self.source {
            MessageSource::Assistant => "Remy",
            MessageSource::User => "You",
        };
        writeln!(f, "**{speaker}**: {}", self.message)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Total time: {}", Minutes(self.total_time))?;
        if !self.source_url.is_empty() {
            writeln!(f, "- Source: {}", self.source_url)?;
        }
        writeln!(f, "- Added: {}", LocalDateTime(&self.created_at))?;

        if !self.recipe_ingredients.is_empty() {
            writeln!(f, "\n## Ingredients")?;
            for (aisle, items) in self.ingredients_by_aisle() {
                writeln!(f, "\n### {aisle}\n")?;
                for ingredient in items {
                    writeln!(f, "- {}", ingredient.line())?;
                }
            }
        }

        if self.recipe_steps.is_empty() {
            writeln!(f, "\nNo steps in this recipe.")?;
        } else {
            writeln!(f, "\n## Steps\n")?;
            let mut steps: Vec<_> = self.recipe_steps.iter().collect();
            steps.sort_by_key(|s| s.step_number);
            for step in steps {
                writeln!(f, "{}. {}", step.step_number, step.instruction)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for RecipeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Time**: {} | **Steps**: {}",
            Minutes(self.total_time),
            self.total_steps
        )?;
        if !self.source_url.is_empty() {
            writeln!(f, "- **Source**: {}", self.source_url)?;
        }
        writeln!(f, "- **Added**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::models::{RecipeIngredient, RecipeStep};

    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: "r1".to_string(),
            title: "Garlic Bread".to_string(),
            total_time: 25,
            source_url: "https://example.com/garlic-bread".to_string(),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            recipe_ingredients: vec![
                RecipeIngredient {
                    amount: 1.0,
                    unit: "loaf".to_string(),
                    ingredient: "baguette".to_string(),
                    aisle: Some("Bakery".to_string()),
                },
                RecipeIngredient {
                    amount: 4.0,
                    unit: "cloves".to_string(),
                    ingredient: "garlic".to_string(),
                    aisle: None,
                },
                RecipeIngredient {
                    amount: 50.0,
                    unit: "g".to_string(),
                    ingredient: "butter".to_string(),
                    aisle: Some("Dairy".to_string()),
                },
            ],
            recipe_steps: vec![
                RecipeStep {
                    step_number: 2,
                    instruction: "Spread on the bread".to_string(),
                },
                RecipeStep {
                    step_number: 1,
                    instruction: "Mix garlic and butter".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_recipe_display() {
        let output = recipe().to_string();

        assert!(output.starts_with("# Garlic Bread\n"));
        assert!(output.contains("- Total time: 25 min"));
        assert!(output.contains("- Source: https://example.com/garlic-bread"));
        assert!(output.contains("### Bakery\n\n- 1 loaf baguette"));
        assert!(output.contains("### Other\n\n- 4 cloves garlic"));
        assert!(output.contains("### Dairy\n\n- 50 g butter"));

        let first = output.find("1. Mix garlic and butter").unwrap();
        let second = output.find("2. Spread on the bread").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_summary_display() {
        let summary = RecipeSummary::from(&recipe());
        let output = summary.to_string();
        assert!(output.contains("## Garlic Bread (ID: r1)"));
        assert!(output.contains("**Steps**: 2"));
    }

    #[test]
    fn test_message_and_status_display() {
        assert_eq!(
            ConversationMessage::user("next step").to_string(),
            "**You**: next step\n"
        );
        assert_eq!(SessionStatus::Connected.to_string(), "connected");
        assert_eq!(
            SessionStatus::Error {
                message: "Connection error: lost".to_string()
            }
            .to_string(),
            "error: Connection error: lost"
        );
    }
}
