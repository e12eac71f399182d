// ABOUTME: Core data models for recipes, ingredients, meal plans, and grocery lists
// ABOUTME: Re-exports every model type so callers import from one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Grocery list and item models
pub mod grocery;
/// Id generation
pub mod ids;
/// Ingredient library models
pub mod ingredient;
/// Scheduled meal models
pub mod meal_plan;
/// Recipe models
pub mod recipe;
/// Measurement units
pub mod unit;

pub use grocery::{GroceryItem, GroceryItemRef, GroceryList};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use ingredient::{Ingredient, IngredientCategory};
pub use meal_plan::{DateRange, MealPlan, MealPlanKind, MealSlot};
pub use recipe::{is_positive, Recipe, RecipeIngredient, SubRecipeRef};
pub use unit::{MeasurementUnit, UnitFamily};
