// ABOUTME: Main library entry point for the meal planner engine
// ABOUTME: Storage collaborator traits, async services, and logging around the synchronous engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Meal Planner
//!
//! Recipe graph analysis and grocery list aggregation for a meal planning
//! application. Recipes nest other recipes as sub-recipes; meal plans schedule
//! recipes (or free-form meals) on dates; grocery lists merge every ingredient
//! needed across a date range.
//!
//! ## Architecture
//!
//! - **`meal_planner_core`**: models, `AppError`, constants
//! - **`meal_planner_intelligence`**: the pure engine (units, graph, resolver, aggregator, import)
//! - **database**: async repository traits and an in-memory store
//! - **services**: recipe and grocery list operations over a repository
//! - **logging**: `tracing-subscriber` setup for embedding applications
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use meal_planner::database::InMemoryStore;
//! use meal_planner::errors::AppResult;
//! use meal_planner::models::{DateRange, UuidIdGenerator};
//! use meal_planner::services::PlannerServices;
//! use meal_planner::intelligence::PlannerConfig;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = InMemoryStore::new();
//!     let services =
//!         PlannerServices::in_memory(&store, PlannerConfig::default(), Arc::new(UuidIdGenerator));
//!
//!     let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap_or_default();
//!     let end = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap_or_default();
//!     let generated = services
//!         .grocery
//!         .generate(DateRange::new(start, end)?, "Week 10")
//!         .await?;
//!     println!("{} items", generated.items.len());
//!     Ok(())
//! }
//! ```

/// Unified error handling shared by every crate in the workspace
pub use meal_planner_core::errors;

/// Domain models (recipes, ingredients, meal plans, grocery lists)
pub use meal_planner_core::models;

/// Unit factors, depth limits, and labels
pub use meal_planner_core::constants;

/// The synchronous engine
pub use meal_planner_intelligence as intelligence;

/// Storage collaborator traits and the in-memory store
pub mod database;

/// Structured logging configuration
pub mod logging;

/// Recipe and grocery list services
pub mod services;
