//! Context variables handed to the voice agent for one step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CookingError, Result},
    models::Recipe,
};

pub const RECIPE_TITLE: &str = "recipe_title";
pub const TOTAL_TIME: &str = "total_time";
pub const CURRENT_STEP: &str = "current_step";
pub const CURRENT_INSTRUCTION: &str = "current_instruction";
pub const TOTAL_STEPS: &str = "total_steps";
pub const INGREDIENTS: &str = "ingredients";
pub const STEPS: &str = "steps";

/// Flat key-value payload describing the current recipe and step.
///
/// Keys are kept sorted, so serializing the same context always yields the
/// same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextVariables(BTreeMap<String, String>);

impl ContextVariables {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Narration brief for agents that take a single prompt instead of
    /// variables.
    pub fn prompt(&self) -> String {
        let value = |key| self.get(key).unwrap_or_default();
        format!(
            "I'm helping someone cook {title}. It takes {time} minutes.\n\n\
             The ingredients needed are:\n{ingredients}\n\n\
             There are {total} steps in total:\n{steps}\n\n\
             The current step ({current}) is: {instruction}\n\n\
             Please help guide the user through this step and be ready to move on when they're done. \
             If they ask about ingredients or previous steps, you can reference the details above.",
            title = value(RECIPE_TITLE),
            time = value(TOTAL_TIME),
            ingredients = value(INGREDIENTS),
            total = value(TOTAL_STEPS),
            steps = value(STEPS),
            current = value(CURRENT_STEP),
            instruction = value(CURRENT_INSTRUCTION),
        )
    }
}

/// Builds the context for the step at the 0-based `step_index`.
///
/// Pure: the same recipe and index always produce an identical context.
/// Steps are listed in `step_number` order.
pub fn derive_context(recipe: &Recipe, step_index: usize) -> Result<ContextVariables> {
    let mut steps: Vec<_> = recipe.recipe_steps.iter().collect();
    steps.sort_by_key(|s| s.step_number);

    let current = steps.get(step_index).ok_or_else(|| {
        CookingError::invalid_input("step_index").with_reason(format!(
            "step {} is out of range for a recipe with {} steps",
            step_index + 1,
            steps.len()
        ))
    })?;

    let ingredients = recipe
        .recipe_ingredients
        .iter()
        .map(|i| i.line())
        .collect::<Vec<_>>()
        .join("\n");

    let step_listing = steps
        .iter()
        .map(|s| format!("{}. {}", s.step_number, s.instruction))
        .collect::<Vec<_>>()
        .join("\n");

    let mut context = ContextVariables::default();
    context.insert(RECIPE_TITLE, recipe.title.as_str());
    context.insert(TOTAL_TIME, recipe.total_time.to_string());
    context.insert(CURRENT_STEP, (step_index + 1).to_string());
    context.insert(CURRENT_INSTRUCTION, current.instruction.as_str());
    context.insert(TOTAL_STEPS, steps.len().to_string());
    context.insert(INGREDIENTS, ingredients);
    context.insert(STEPS, step_listing);
    Ok(context)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{RecipeIngredient, RecipeStep};

    fn recipe() -> Recipe {
        Recipe {
            id: "r".to_string(),
            title: "Omelette".to_string(),
            total_time: 10,
            source_url: "https://example.com/omelette".to_string(),
            created_at: Timestamp::from_second(1_700_000_000).unwrap(),
            recipe_ingredients: vec![
                RecipeIngredient {
                    amount: 3.0,
                    unit: String::new(),
                    ingredient: "eggs".to_string(),
                    aisle: Some("Dairy".to_string()),
                },
                RecipeIngredient {
                    amount: 0.5,
                    unit: "tsp".to_string(),
                    ingredient: "salt".to_string(),
                    aisle: None,
                },
            ],
            recipe_steps: vec![
                RecipeStep {
                    step_number: 2,
                    instruction: "Pour into the pan".to_string(),
                },
                RecipeStep {
                    step_number: 1,
                    instruction: "Beat the eggs".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_context_for_second_step() {
        let context = derive_context(&recipe(), 1).unwrap();

        assert_eq!(context.get(RECIPE_TITLE), Some("Omelette"));
        assert_eq!(context.get(TOTAL_TIME), Some("10"));
        assert_eq!(context.get(CURRENT_STEP), Some("2"));
        assert_eq!(context.get(CURRENT_INSTRUCTION), Some("Pour into the pan"));
        assert_eq!(context.get(TOTAL_STEPS), Some("2"));
        assert_eq!(context.get(INGREDIENTS), Some("3 eggs\n0.5 tsp salt"));
        assert_eq!(
            context.get(STEPS),
            Some("1. Beat the eggs\n2. Pour into the pan")
        );
        assert_eq!(context.len(), 7);
    }

    #[test]
    fn test_context_is_deterministic() {
        let recipe = recipe();
        let first = serde_json::to_string(&derive_context(&recipe, 0).unwrap()).unwrap();
        let second = serde_json::to_string(&derive_context(&recipe, 0).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_step_is_rejected() {
        assert!(derive_context(&recipe(), 2).is_err());
    }

    #[test]
    fn test_prompt_mentions_current_step() {
        let prompt = derive_context(&recipe(), 0).unwrap().prompt();
        assert!(prompt.contains("cook Omelette"));
        assert!(prompt.contains("The current step (1) is: Beat the eggs"));
    }
}
