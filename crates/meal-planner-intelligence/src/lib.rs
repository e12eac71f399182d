// ABOUTME: Recipe graph and grocery aggregation engine for the meal planner
// ABOUTME: Unit conversion, sub-recipe cycle analysis, quantity resolution, aggregation, import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Meal Planner Intelligence
//!
//! Synchronous, side-effect-free algorithms over immutable snapshots of recipes,
//! ingredients, and meal plans. Nothing here performs I/O; the root crate's
//! services fetch snapshots from storage and hand results back to it.
//!
//! ## Modules
//!
//! - **units**: canonical units, conversion, display-unit consolidation
//! - **graph**: sub-recipe cycle detection, picker exclusions, nesting depth
//! - **resolver**: recursive expansion of a recipe into scaled ingredient quantities
//! - **aggregation**: grocery list generation over a date range
//! - **import**: mapping imported recipes onto the ingredient library
//! - **config**: engine settings with environment overrides

/// Grocery list aggregation
pub mod aggregation;
/// Engine configuration
pub mod config;
/// Sub-recipe graph analysis
pub mod graph;
/// Recipe import helper
pub mod import;
/// Ingredient quantity resolution
pub mod resolver;
/// Unit conversion and consolidation
pub mod units;

pub use aggregation::{
    generate_grocery_list, normalize_name, GeneratedGroceryList, GroceryListAggregator,
    MealPlanDiagnostic,
};
pub use config::{ConfigError, PlannerConfig};
pub use graph::{
    ensure_acyclic, get_excluded_recipe_ids, get_recipe_depth, would_create_circular,
    RecipeGraph, RecipeGraphError,
};
pub use import::{
    ImportError, ImportIssue, ImportOutcome, ImportReport, ImportedIngredient, ImportedRecipe,
    ImportedSubRecipe, IngredientMatch, MatchStrategy, RecipeImporter,
};
pub use resolver::{
    IngredientQuantityResolver, Resolution, ResolutionDiagnostic, ResolvedIngredient,
};
pub use units::{
    consolidate_unit, consolidate_unit_with_threshold, convert_quantity,
    convert_quantity_with_policy, normalize_unit_for_consolidation, ConversionError,
    IncompatibleUnitPolicy, UnitConverter,
};
