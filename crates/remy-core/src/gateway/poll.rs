//! Bounded polling for a recipe the webhook writes asynchronously.

use std::time::Duration;

use log::{debug, warn};
use tokio::time::sleep;

use crate::{
    error::{CookingError, Result},
    library::RecipeStore,
    models::Recipe,
};

/// Fixed-interval polling bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two store queries
    pub interval: Duration,
    /// Number of store queries before giving up (at least one is made)
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

/// Polls `store` for the most recent recipe parsed from `source_url`.
///
/// Terminates in exactly one of three ways:
/// - a complete recipe is found: it is returned with ordered steps
/// - the store query fails: the error is returned at once, no retry
/// - `max_attempts` queries found nothing: [`CookingError::ParseTimeout`]
///
/// A stored recipe that does not validate yet (e.g. its steps are still
/// being written) counts as "not found" and polling continues.
pub async fn poll_for_recipe<S>(store: &S, source_url: &str, config: &PollConfig) -> Result<Recipe>
where
    S: RecipeStore + ?Sized,
{
    let attempts = config.max_attempts.max(1);

    for attempt in 1..=attempts {
        debug!("Polling for parsed recipe {source_url} (attempt {attempt}/{attempts})");

        match store.find_latest_by_url(source_url).await? {
            Some(recipe) => match recipe.validate() {
                Ok(()) => return Ok(recipe.ordered()),
                Err(e) => debug!("Stored recipe for {source_url} is incomplete: {e}"),
            },
            None => debug!("No recipe stored for {source_url} yet"),
        }

        if attempt < attempts {
            sleep(config.interval).await;
        }
    }

    warn!("Gave up waiting for recipe {source_url} after {attempts} attempts");
    Err(CookingError::ParseTimeout { attempts })
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use jiff::Timestamp;

    use super::*;
    use crate::models::RecipeStep;

    /// Store that answers from a script, one entry per query.
    struct ScriptedStore {
        answers: Mutex<Vec<Result<Option<Recipe>>>>,
        queries: AtomicU32,
    }

    impl ScriptedStore {
        fn new(mut answers: Vec<Result<Option<Recipe>>>) -> Self {
            answers.reverse();
            Self {
                answers: Mutex::new(answers),
                queries: AtomicU32::new(0),
            }
        }

        fn queries(&self) -> u32 {
            self.queries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecipeStore for ScriptedStore {
        async fn find_latest_by_url(&self, _source_url: &str) -> Result<Option<Recipe>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.answers.lock().unwrap().pop().unwrap_or(Ok(None))
        }

        async fn save_recipe(&self, _recipe: &Recipe) -> Result<()> {
            Ok(())
        }
    }

    fn recipe(steps: u32) -> Recipe {
        Recipe {
            id: "r".to_string(),
            title: "Stew".to_string(),
            total_time: 90,
            source_url: "https://example.com/stew".to_string(),
            created_at: Timestamp::now(),
            recipe_ingredients: Vec::new(),
            recipe_steps: (1..=steps)
                .rev()
                .map(|n| RecipeStep {
                    step_number: n,
                    instruction: format!("Step {n}"),
                })
                .collect(),
        }
    }

    fn config(max_attempts: u32) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(500),
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_on_fifth_poll_and_stops() {
        let store = ScriptedStore::new(vec![
            Ok(None),
            Ok(None),
            Ok(None),
            Ok(None),
            Ok(Some(recipe(3))),
        ]);

        let found = poll_for_recipe(&store, "https://example.com/stew", &config(10))
            .await
            .expect("Recipe should be found");

        assert_eq!(store.queries(), 5);
        assert_eq!(found.recipe_steps[0].step_number, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_after_max_attempts() {
        let store = ScriptedStore::new(Vec::new());

        let result = poll_for_recipe(&store, "https://example.com/stew", &config(4)).await;

        assert!(matches!(result, Err(CookingError::ParseTimeout { attempts: 4 })));
        assert_eq!(store.queries(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_failure_aborts_immediately() {
        let store = ScriptedStore::new(vec![
            Ok(None),
            Err(CookingError::database("Failed to query recipe")
                .with_source(rusqlite::Error::InvalidQuery)),
            Ok(Some(recipe(2))),
        ]);

        let result = poll_for_recipe(&store, "https://example.com/stew", &config(10)).await;

        assert!(matches!(result, Err(CookingError::Database { .. })));
        assert_eq!(store.queries(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_incomplete_recipe_keeps_polling() {
        let store = ScriptedStore::new(vec![Ok(Some(recipe(0))), Ok(Some(recipe(2)))]);

        let found = poll_for_recipe(&store, "https://example.com/stew", &config(5))
            .await
            .expect("Recipe should be found");

        assert_eq!(found.step_count(), 2);
        assert_eq!(store.queries(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_queries_once() {
        let store = ScriptedStore::new(vec![Ok(Some(recipe(1)))]);

        let found = poll_for_recipe(&store, "https://example.com/stew", &config(0)).await;

        assert!(found.is_ok());
        assert_eq!(store.queries(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_fixed_interval_between_polls() {
        let store = ScriptedStore::new(Vec::new());
        let started = tokio::time::Instant::now();

        let _ = poll_for_recipe(&store, "https://example.com/stew", &config(3)).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1500));
    }
}
