// ABOUTME: Storage collaborator layer for the meal planner
// ABOUTME: Repository traits plus the in-memory reference implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// In-memory store implementing every repository trait
pub mod memory;
/// Async repository traits
pub mod repositories;

pub use memory::InMemoryStore;
pub use repositories::{
    GroceryListRepository, IngredientRepository, MealPlanRepository, RecipeRepository,
    StoredGroceryList,
};
