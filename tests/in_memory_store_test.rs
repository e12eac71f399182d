// ABOUTME: Tests for the in-memory storage collaborator
// ABOUTME: Duplicate ids, missing records, range queries, and shared state across clones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use meal_planner::database::{
    GroceryListRepository, IngredientRepository, InMemoryStore, MealPlanRepository,
    RecipeRepository,
};
use meal_planner::errors::ErrorCode;
use meal_planner::models::{
    DateRange, GroceryItem, GroceryItemRef, GroceryList, Ingredient, IngredientCategory,
    MealPlan, MealSlot, MeasurementUnit, Recipe,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
}

fn list(id: &str) -> GroceryList {
    GroceryList {
        id: id.to_owned(),
        name: "Weekend".to_owned(),
        date_range: DateRange::new(date(1), date(2)).unwrap(),
        created_at: Utc::now(),
    }
}

fn item(id: &str, list_id: &str) -> GroceryItem {
    GroceryItem {
        id: id.to_owned(),
        list_id: list_id.to_owned(),
        ingredient: GroceryItemRef::FreeText {
            name: "bread".to_owned(),
        },
        name: "Bread".to_owned(),
        quantity: 1.0,
        unit: MeasurementUnit::Piece,
        category: IngredientCategory::Other,
        checked: false,
        meal_plan_ids: BTreeSet::new(),
    }
}

#[tokio::test]
async fn test_recipe_crud() {
    let store = InMemoryStore::new();
    let recipe = Recipe::new("r1", "Toast", 1);

    store.add_recipe(&recipe).await.unwrap();
    let err = store.add_recipe(&recipe).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let err = store
        .update_recipe(&Recipe::new("r2", "Jam", 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    store.delete_recipe("r1").await.unwrap();
    let err = store.delete_recipe("r1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_clones_share_state() {
    let store = InMemoryStore::new();
    let other = store.clone();
    other
        .add_ingredient(&Ingredient::new(
            "salt",
            "Salt",
            IngredientCategory::Spices,
            MeasurementUnit::Pinch,
        ))
        .await
        .unwrap();
    assert_eq!(store.get_all_ingredients().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_meal_plan_range_is_inclusive() {
    let store = InMemoryStore::new();
    for (id, day) in [("a", 1), ("b", 3), ("c", 4)] {
        store
            .add_meal_plan(&MealPlan::custom(id, date(day), MealSlot::Lunch, "Picnic"))
            .await
            .unwrap();
    }
    let range = DateRange::new(date(1), date(3)).unwrap();
    let ids: Vec<String> = store
        .get_all_meal_plans_in_range(&range)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["a".to_owned(), "b".to_owned()]);
}

#[tokio::test]
async fn test_persist_rejects_duplicates_and_foreign_items() {
    let store = InMemoryStore::new();
    store
        .persist_grocery_list(&list("l1"), &[item("i1", "l1")])
        .await
        .unwrap();

    let err = store
        .persist_grocery_list(&list("l1"), &[])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let err = store
        .persist_grocery_list(&list("l2"), &[item("i2", "l1")])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(store.get_grocery_list("l2").await.unwrap().is_none());
}
