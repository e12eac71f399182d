// ABOUTME: Storage collaborator interfaces consumed by the meal planner services
// ABOUTME: Async repository traits for recipes, ingredients, meal plans, and grocery lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Repository traits
//!
//! The engine never persists anything itself. Services read snapshots through
//! these traits and hand generated grocery lists back through them. Any backend
//! (the in-memory store, a SQL database, a sync service) implements them.

use async_trait::async_trait;
use meal_planner_core::errors::AppResult;
use meal_planner_core::models::{DateRange, GroceryItem, GroceryList, Ingredient, MealPlan, Recipe};
use serde::{Deserialize, Serialize};

/// A persisted grocery list together with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredGroceryList {
    /// List header
    pub list: GroceryList,
    /// List items
    pub items: Vec<GroceryItem>,
}

/// Recipe storage
///
/// Cycle checks run against a [`Self::get_all_recipes`] snapshot and are only sound if
/// nothing else writes between that read and the following add or update. The
/// services serialize their own check-then-write sequences; any other writer sharing
/// a backend must serialize against them, or the backend must offer the check and
/// write as one transaction. Backend failures are reported as `ErrorCode::StorageError`.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Snapshot of every stored recipe
    async fn get_all_recipes(&self) -> AppResult<Vec<Recipe>>;

    /// Fetch one recipe
    async fn get_recipe(&self, recipe_id: &str) -> AppResult<Option<Recipe>>;

    /// Insert a new recipe
    ///
    /// # Errors
    ///
    /// `ResourceAlreadyExists` when the id is taken
    async fn add_recipe(&self, recipe: &Recipe) -> AppResult<()>;

    /// Replace an existing recipe
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the id is unknown
    async fn update_recipe(&self, recipe: &Recipe) -> AppResult<()>;

    /// Remove a recipe
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the id is unknown
    async fn delete_recipe(&self, recipe_id: &str) -> AppResult<()>;
}

/// Shared ingredient library
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Snapshot of the whole library
    async fn get_all_ingredients(&self) -> AppResult<Vec<Ingredient>>;

    /// Add an ingredient to the library
    ///
    /// # Errors
    ///
    /// `ResourceAlreadyExists` when the id is taken
    async fn add_ingredient(&self, ingredient: &Ingredient) -> AppResult<()>;
}

/// Scheduled meals
#[async_trait]
pub trait MealPlanRepository: Send + Sync {
    /// Meal plans dated inside `range`, both ends inclusive
    async fn get_all_meal_plans_in_range(&self, range: &DateRange) -> AppResult<Vec<MealPlan>>;

    /// Schedule a meal
    ///
    /// # Errors
    ///
    /// `ResourceAlreadyExists` when the id is taken
    async fn add_meal_plan(&self, meal_plan: &MealPlan) -> AppResult<()>;
}

/// Generated grocery lists
#[async_trait]
pub trait GroceryListRepository: Send + Sync {
    /// Store a generated list and its items in one call
    async fn persist_grocery_list(&self, list: &GroceryList, items: &[GroceryItem])
        -> AppResult<()>;

    /// Fetch a stored list
    async fn get_grocery_list(&self, list_id: &str) -> AppResult<Option<StoredGroceryList>>;

    /// Tick or untick an item
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the list or item is unknown
    async fn set_item_checked(&self, list_id: &str, item_id: &str, checked: bool)
        -> AppResult<()>;
}
