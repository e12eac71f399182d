// ABOUTME: In-memory implementation of every storage collaborator trait
// ABOUTME: RwLock-guarded collections used by tests, benchmarks, and embedding applications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use meal_planner_core::errors::{AppError, AppResult};
use meal_planner_core::models::{DateRange, GroceryItem, GroceryList, Ingredient, MealPlan, Recipe};
use tokio::sync::RwLock;
use tracing::debug;

use super::repositories::{
    GroceryListRepository, IngredientRepository, MealPlanRepository, RecipeRepository,
    StoredGroceryList,
};

#[derive(Debug, Default)]
struct StoreState {
    recipes: Vec<Recipe>,
    ingredients: Vec<Ingredient>,
    meal_plans: Vec<MealPlan>,
    grocery_lists: HashMap<String, StoredGroceryList>,
}

/// Process-local store implementing all four repository traits
///
/// Clones share the same underlying state. Collections keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with snapshots
    #[must_use]
    pub fn with_data(
        recipes: Vec<Recipe>,
        ingredients: Vec<Ingredient>,
        meal_plans: Vec<MealPlan>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                recipes,
                ingredients,
                meal_plans,
                grocery_lists: HashMap::new(),
            })),
        }
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn get_all_recipes(&self) -> AppResult<Vec<Recipe>> {
        Ok(self.state.read().await.recipes.clone())
    }

    async fn get_recipe(&self, recipe_id: &str) -> AppResult<Option<Recipe>> {
        let state = self.state.read().await;
        Ok(state.recipes.iter().find(|r| r.id == recipe_id).cloned())
    }

    async fn add_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.recipes.iter().any(|r| r.id == recipe.id) {
            return Err(AppError::already_exists(format!("Recipe '{}'", recipe.id)));
        }
        state.recipes.push(recipe.clone());
        debug!(recipe_id = %recipe.id, "Stored recipe");
        Ok(())
    }

    async fn update_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        let mut state = self.state.write().await;
        let slot = state
            .recipes
            .iter_mut()
            .find(|r| r.id == recipe.id)
            .ok_or_else(|| AppError::not_found(format!("Recipe '{}'", recipe.id)))?;
        *slot = recipe.clone();
        Ok(())
    }

    async fn delete_recipe(&self, recipe_id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let before = state.recipes.len();
        state.recipes.retain(|r| r.id != recipe_id);
        if state.recipes.len() == before {
            return Err(AppError::not_found(format!("Recipe '{recipe_id}'")));
        }
        Ok(())
    }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
    async fn get_all_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        Ok(self.state.read().await.ingredients.clone())
    }

    async fn add_ingredient(&self, ingredient: &Ingredient) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.ingredients.iter().any(|i| i.id == ingredient.id) {
            return Err(AppError::already_exists(format!(
                "Ingredient '{}'",
                ingredient.id
            )));
        }
        state.ingredients.push(ingredient.clone());
        Ok(())
    }
}

#[async_trait]
impl MealPlanRepository for InMemoryStore {
    async fn get_all_meal_plans_in_range(&self, range: &DateRange) -> AppResult<Vec<MealPlan>> {
        let state = self.state.read().await;
        Ok(state
            .meal_plans
            .iter()
            .filter(|p| range.contains(p.date))
            .cloned()
            .collect())
    }

    async fn add_meal_plan(&self, meal_plan: &MealPlan) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.meal_plans.iter().any(|p| p.id == meal_plan.id) {
            return Err(AppError::already_exists(format!(
                "Meal plan '{}'",
                meal_plan.id
            )));
        }
        state.meal_plans.push(meal_plan.clone());
        Ok(())
    }
}

#[async_trait]
impl GroceryListRepository for InMemoryStore {
    async fn persist_grocery_list(
        &self,
        list: &GroceryList,
        items: &[GroceryItem],
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.grocery_lists.contains_key(&list.id) {
            return Err(AppError::already_exists(format!(
                "Grocery list '{}'",
                list.id
            )));
        }
        if let Some(stray) = items.iter().find(|item| item.list_id != list.id) {
            return Err(AppError::invalid_input(format!(
                "Grocery item '{}' belongs to list '{}', not '{}'",
                stray.id, stray.list_id, list.id
            )));
        }
        state.grocery_lists.insert(
            list.id.clone(),
            StoredGroceryList {
                list: list.clone(),
                items: items.to_vec(),
            },
        );
        debug!(list_id = %list.id, items = items.len(), "Stored grocery list");
        Ok(())
    }

    async fn get_grocery_list(&self, list_id: &str) -> AppResult<Option<StoredGroceryList>> {
        Ok(self.state.read().await.grocery_lists.get(list_id).cloned())
    }

    async fn set_item_checked(&self, list_id: &str, item_id: &str, checked: bool) -> AppResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .grocery_lists
            .get_mut(list_id)
            .ok_or_else(|| AppError::not_found(format!("Grocery list '{list_id}'")))?;
        let item = stored
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found(format!("Grocery item '{item_id}'")))?;
        item.checked = checked;
        Ok(())
    }
}
