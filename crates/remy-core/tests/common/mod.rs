#![allow(dead_code)]

use jiff::Timestamp;
use remy_core::{
    models::{Recipe, RecipeIngredient, RecipeStep},
    RecipeLibrary, RecipeLibraryBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test library
pub async fn create_test_library() -> (TempDir, RecipeLibrary) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let library = RecipeLibraryBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create library");
    (temp_dir, library)
}

/// A valid recipe with `steps` numbered steps.
pub fn sample_recipe(id: &str, title: &str, source_url: &str, steps: u32) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        total_time: 30,
        source_url: source_url.to_string(),
        created_at: Timestamp::from_second(1_700_000_000).expect("valid timestamp"),
        recipe_ingredients: vec![
            RecipeIngredient {
                amount: 2.0,
                unit: "cup".to_string(),
                ingredient: "flour".to_string(),
                aisle: Some("Baking".to_string()),
            },
            RecipeIngredient {
                amount: 3.0,
                unit: String::new(),
                ingredient: "eggs".to_string(),
                aisle: None,
            },
        ],
        recipe_steps: (1..=steps)
            .map(|n| RecipeStep {
                step_number: n,
                instruction: format!("Do step {n}"),
            })
            .collect(),
    }
}
