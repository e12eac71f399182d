// ABOUTME: Grocery list generation over storage snapshots
// ABOUTME: Preview without persisting, generate and persist, and item check-off
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::Arc;

use meal_planner_core::errors::AppResult;
use meal_planner_core::models::{DateRange, IdGenerator};
use meal_planner_intelligence::{GeneratedGroceryList, GroceryListAggregator, PlannerConfig};
use tracing::{info, warn};

use crate::database::{
    GroceryListRepository, IngredientRepository, MealPlanRepository, RecipeRepository,
    StoredGroceryList,
};

/// Grocery list operations backed by the storage collaborator
pub struct GroceryListService {
    recipes: Arc<dyn RecipeRepository>,
    ingredients: Arc<dyn IngredientRepository>,
    meal_plans: Arc<dyn MealPlanRepository>,
    grocery_lists: Arc<dyn GroceryListRepository>,
    aggregator: GroceryListAggregator,
}

impl GroceryListService {
    /// Create a service over the given collaborators
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        ingredients: Arc<dyn IngredientRepository>,
        meal_plans: Arc<dyn MealPlanRepository>,
        grocery_lists: Arc<dyn GroceryListRepository>,
        config: &PlannerConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            recipes,
            ingredients,
            meal_plans,
            grocery_lists,
            aggregator: GroceryListAggregator::new(config, ids),
        }
    }

    /// Aggregate the meals in `date_range` without storing anything
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty name or reversed range, `DataIntegrity` for a
    /// cyclic stored graph, or any storage error
    pub async fn preview(
        &self,
        date_range: DateRange,
        name: &str,
    ) -> AppResult<GeneratedGroceryList> {
        date_range.validate()?;

        let (meal_plans, recipes, ingredients) = tokio::try_join!(
            self.meal_plans.get_all_meal_plans_in_range(&date_range),
            self.recipes.get_all_recipes(),
            self.ingredients.get_all_ingredients()
        )?;

        let generated = self
            .aggregator
            .generate(date_range, name, &meal_plans, &recipes, &ingredients)?;
        log_summary(&generated);
        Ok(generated)
    }

    /// Aggregate and hand the list to storage
    ///
    /// # Errors
    ///
    /// Same as [`Self::preview`], plus persistence failures
    pub async fn generate(
        &self,
        date_range: DateRange,
        name: &str,
    ) -> AppResult<GeneratedGroceryList> {
        let generated = self.preview(date_range, name).await?;
        self.grocery_lists
            .persist_grocery_list(&generated.list, &generated.items)
            .await?;
        info!(list_id = %generated.list.id, "Persisted grocery list");
        Ok(generated)
    }

    /// Fetch a stored list
    ///
    /// # Errors
    ///
    /// Storage errors only
    pub async fn get_list(&self, list_id: &str) -> AppResult<Option<StoredGroceryList>> {
        self.grocery_lists.get_grocery_list(list_id).await
    }

    /// Tick or untick an item on a stored list
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the list or item is unknown
    pub async fn check_item(&self, list_id: &str, item_id: &str, checked: bool) -> AppResult<()> {
        self.grocery_lists
            .set_item_checked(list_id, item_id, checked)
            .await?;
        info!(list_id, item_id, checked, "Updated grocery item");
        Ok(())
    }
}

fn log_summary(generated: &GeneratedGroceryList) {
    info!(
        list_id = %generated.list.id,
        start = %generated.list.date_range.start,
        end = %generated.list.date_range.end,
        items = generated.items.len(),
        diagnostics = generated.diagnostics.len(),
        "Grocery list ready"
    );
    for entry in &generated.diagnostics {
        warn!(
            meal_plan_id = %entry.meal_plan_id,
            diagnostic = ?entry.diagnostic,
            "Meal content skipped during grocery generation"
        );
    }
}
