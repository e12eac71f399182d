// ABOUTME: Core types and constants for the meal planner recipe and grocery engine
// ABOUTME: Foundation crate with error handling, domain models, and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Meal Planner Core
//!
//! Foundation crate providing shared types for the meal planner workspace. The
//! types here describe the read-only snapshots the engine consumes (recipes,
//! ingredients, meal plans) and the payload it produces (grocery lists and items).
//! This crate is designed to change infrequently, enabling incremental compilation
//! benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Unit factors, depth limits, and fallback labels
//! - **models**: Recipe, ingredient, meal plan, and grocery list data models

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Recipe, Ingredient, `MealPlan`, `GroceryList`, etc.)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
