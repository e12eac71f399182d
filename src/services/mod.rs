// ABOUTME: Domain service layer wiring the engine to its storage collaborator
// ABOUTME: Recipe lifecycle, grocery list generation, and the composition root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain service layer
//!
//! Services fetch snapshots through the repository traits, run the synchronous
//! engine over them, and hand results back. They hold no state beyond their
//! collaborators, so one instance can serve concurrent callers.

use std::sync::Arc;

use meal_planner_core::models::{IdGenerator, UuidIdGenerator};
use meal_planner_intelligence::PlannerConfig;

use crate::database::InMemoryStore;

/// Grocery list preview, generation, and check-off
pub mod grocery;

/// Recipe save, delete, picker, and import
pub mod recipes;

pub use grocery::GroceryListService;
pub use recipes::{RecipeService, SaveOutcome, SubRecipeCandidate, SubRecipePicker};

/// Both services built over one store
pub struct PlannerServices {
    /// Recipe operations
    pub recipes: RecipeService,
    /// Grocery list operations
    pub grocery: GroceryListService,
}

impl PlannerServices {
    /// Wire both services to a single in-memory store
    #[must_use]
    pub fn in_memory(
        store: &InMemoryStore,
        config: PlannerConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let shared = Arc::new(store.clone());
        Self {
            grocery: GroceryListService::new(
                shared.clone(),
                shared.clone(),
                shared.clone(),
                shared.clone(),
                &config,
                ids.clone(),
            ),
            recipes: RecipeService::new(shared.clone(), shared, config, ids),
        }
    }

    /// In-memory wiring with the global config and UUID ids
    #[must_use]
    pub fn in_memory_default(store: &InMemoryStore) -> Self {
        Self::in_memory(store, PlannerConfig::global().clone(), Arc::new(UuidIdGenerator))
    }
}
