// ABOUTME: Integration tests for the recipe service over the in-memory store
// ABOUTME: Save with cycle rejection, guarded delete, picker exclusions, and import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use meal_planner::database::{IngredientRepository, InMemoryStore, RecipeRepository};
use meal_planner::errors::ErrorCode;
use meal_planner::intelligence::{ImportedIngredient, ImportedRecipe, PlannerConfig};
use meal_planner::models::{
    Ingredient, IngredientCategory, MeasurementUnit, Recipe, RecipeIngredient,
    SequentialIdGenerator, SubRecipeRef,
};
use meal_planner::services::{RecipeService, SaveOutcome};

// ============================================================================
// Fixtures
// ============================================================================

fn service(store: &InMemoryStore) -> RecipeService {
    let shared = Arc::new(store.clone());
    RecipeService::new(
        shared.clone(),
        shared,
        PlannerConfig::default(),
        Arc::new(SequentialIdGenerator::new("recipe")),
    )
}

fn recipe(id: &str, name: &str, subs: &[&str]) -> Recipe {
    subs.iter().fold(
        Recipe::new(id, name, 2).with_ingredient(RecipeIngredient::free_text(
            "Salt",
            1.0,
            MeasurementUnit::Pinch,
        )),
        |r, sub| r.with_sub_recipe(SubRecipeRef::new(*sub, 1.0)),
    )
}

/// A nests B, B nests C
async fn seeded() -> (InMemoryStore, RecipeService) {
    let store = InMemoryStore::new();
    let svc = service(&store);
    svc.save_recipe(&recipe("C", "Stock", &[])).await.unwrap();
    svc.save_recipe(&recipe("B", "Gravy", &["C"])).await.unwrap();
    svc.save_recipe(&recipe("A", "Roast Dinner", &["B"])).await.unwrap();
    (store, svc)
}

// ============================================================================
// Save
// ============================================================================

#[tokio::test]
async fn test_save_creates_then_updates() {
    let store = InMemoryStore::new();
    let svc = service(&store);

    let first = svc.save_recipe(&recipe("soup", "Soup", &[])).await.unwrap();
    assert_eq!(first, SaveOutcome::Created);

    let renamed = recipe("soup", "Tomato Soup", &[]);
    let second = svc.save_recipe(&renamed).await.unwrap();
    assert_eq!(second, SaveOutcome::Updated);

    let stored = store.get_recipe("soup").await.unwrap().unwrap();
    assert_eq!(stored.name, "Tomato Soup");
}

#[tokio::test]
async fn test_save_rejects_cycle_and_leaves_store_untouched() {
    let (store, svc) = seeded().await;

    let looping = recipe("C", "Stock", &["A"]);
    let err = svc.save_recipe(&looping).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CircularReference);

    let stored = store.get_recipe("C").await.unwrap().unwrap();
    assert!(stored.sub_recipes.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_opposing_saves_never_store_a_cycle() {
    for _ in 0..25 {
        let store = InMemoryStore::new();
        let svc = Arc::new(service(&store));
        svc.save_recipe(&recipe("X", "Pastry", &[])).await.unwrap();
        svc.save_recipe(&recipe("Y", "Filling", &[])).await.unwrap();

        let forward = {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move { svc.save_recipe(&recipe("X", "Pastry", &["Y"])).await })
        };
        let backward = {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move { svc.save_recipe(&recipe("Y", "Filling", &["X"])).await })
        };
        let results = [forward.await.unwrap(), backward.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let err = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert_eq!(err.code, ErrorCode::CircularReference);

        let nesting = store
            .get_all_recipes()
            .await
            .unwrap()
            .iter()
            .filter(|r| !r.sub_recipes.is_empty())
            .count();
        assert_eq!(nesting, 1);
    }
}

#[tokio::test]
async fn test_save_rejects_self_reference() {
    let store = InMemoryStore::new();
    let svc = service(&store);
    let err = svc
        .save_recipe(&recipe("loop", "Loop", &["loop"]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CircularReference);
    assert!(store.get_all_recipes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_validates_fields_first() {
    let store = InMemoryStore::new();
    let svc = service(&store);

    let err = svc.save_recipe(&recipe("x", "  ", &[])).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let zero = Recipe::new("y", "Zero", 0);
    let err = svc.save_recipe(&zero).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_refuses_nested_recipe() {
    let (store, svc) = seeded().await;

    let err = svc.delete_recipe("B").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceInUse);
    assert!(store.get_recipe("B").await.unwrap().is_some());

    svc.delete_recipe("A").await.unwrap();
    svc.delete_recipe("B").await.unwrap();
    assert_eq!(store.get_all_recipes().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_recipe_is_not_found() {
    let store = InMemoryStore::new();
    let err = service(&store).delete_recipe("ghost").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

// ============================================================================
// Picker
// ============================================================================

#[tokio::test]
async fn test_picker_excludes_self_and_ancestors() {
    let (_store, svc) = seeded().await;

    let picker = svc.sub_recipe_picker("C").await.unwrap();
    let excluded: Vec<&str> = picker.excluded_ids.iter().map(String::as_str).collect();
    assert_eq!(excluded, vec!["A", "B", "C"]);
    assert!(picker.candidates.is_empty());
    assert_eq!(picker.depth, 1);
    assert!(!picker.at_max_depth);

    let picker = svc.sub_recipe_picker("A").await.unwrap();
    let names: Vec<&str> = picker.candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Gravy", "Stock"]);
    assert_eq!(picker.depth, 2);
    assert!(picker.at_max_depth);
}

#[tokio::test]
async fn test_picker_for_unsaved_recipe_offers_everything() {
    let (_store, svc) = seeded().await;
    let picker = svc.sub_recipe_picker("draft").await.unwrap();
    assert_eq!(picker.excluded_ids.len(), 1);
    assert_eq!(picker.candidates.len(), 3);
    assert_eq!(picker.depth, 0);
}

// ============================================================================
// Import
// ============================================================================

#[tokio::test]
async fn test_import_stores_recipe_under_fresh_id() {
    let store = InMemoryStore::new();
    store
        .add_ingredient(&Ingredient::new(
            "egg",
            "Egg",
            IngredientCategory::Dairy,
            MeasurementUnit::Piece,
        ))
        .await
        .unwrap();
    let svc = service(&store);

    let imported = ImportedRecipe {
        name: "Omelette".to_owned(),
        servings: 1,
        ingredients: vec![ImportedIngredient {
            name: "Eggs".to_owned(),
            quantity: 3.0,
            unit: String::new(),
        }],
        sub_recipes: Vec::new(),
    };

    let outcome = svc.import_recipe(&imported).await.unwrap();
    assert_eq!(outcome.recipe.id, "recipe-1");
    assert_eq!(outcome.report.matched.len(), 1);

    let stored = store.get_recipe("recipe-1").await.unwrap().unwrap();
    assert_eq!(stored.ingredients[0].ingredient_id.as_deref(), Some("egg"));
}

#[tokio::test]
async fn test_import_failure_stores_nothing() {
    let store = InMemoryStore::new();
    let svc = service(&store);
    let imported = ImportedRecipe {
        name: String::new(),
        servings: -2,
        ingredients: Vec::new(),
        sub_recipes: Vec::new(),
    };

    let err = svc.import_recipe(&imported).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(store.get_all_recipes().await.unwrap().is_empty());
}
