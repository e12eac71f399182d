// ABOUTME: Recipe lifecycle operations over the storage collaborator
// ABOUTME: Save with cycle checks, guarded delete, sub-recipe picker data, and import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::BTreeSet;
use std::sync::Arc;

use meal_planner_core::errors::{AppError, AppResult, ErrorCode};
use meal_planner_core::models::{IdGenerator, Recipe};
use meal_planner_intelligence::{
    ImportOutcome, ImportedRecipe, PlannerConfig, RecipeGraph, RecipeImporter,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::database::{IngredientRepository, RecipeRepository};

/// Whether `save_recipe` inserted or replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// New recipe stored
    Created,
    /// Existing recipe replaced
    Updated,
}

/// A recipe that may be offered as a sub-recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRecipeCandidate {
    /// Recipe id
    pub id: String,
    /// Recipe name
    pub name: String,
}

/// Data a sub-recipe picker needs for one recipe being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRecipePicker {
    /// Recipe being edited
    pub recipe_id: String,
    /// Ids that must not be offered: the recipe itself and every recipe that nests it
    pub excluded_ids: BTreeSet<String>,
    /// Nesting depth of the recipe, capped at the configured picker depth
    pub depth: usize,
    /// Whether the cap was reached
    pub at_max_depth: bool,
    /// Recipes that are safe to add, sorted by name
    pub candidates: Vec<SubRecipeCandidate>,
}

/// Recipe operations that keep the stored sub-recipe graph acyclic
///
/// Saves and deletes hold a service-wide write lock from the snapshot read through the
/// storage write, so two saves through the same service cannot both pass the cycle
/// check against a stale snapshot. Writes that reach the repository some other way are
/// not covered; see [`RecipeRepository`].
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    ingredients: Arc<dyn IngredientRepository>,
    config: PlannerConfig,
    ids: Arc<dyn IdGenerator>,
    writes: Mutex<()>,
}

impl RecipeService {
    /// Create a service over the given collaborators
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        ingredients: Arc<dyn IngredientRepository>,
        config: PlannerConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            recipes,
            ingredients,
            config,
            ids,
            writes: Mutex::new(()),
        }
    }

    /// Validate and store a recipe
    ///
    /// # Errors
    ///
    /// `InvalidInput`/`ValueOutOfRange` for bad fields, `CircularReference` when a
    /// sub-recipe edge would close a loop, or any storage error
    pub async fn save_recipe(&self, recipe: &Recipe) -> AppResult<SaveOutcome> {
        recipe.validate()?;

        let _write = self.writes.lock().await;
        let snapshot = self.recipes.get_all_recipes().await?;
        RecipeGraph::new(&snapshot).ensure_acyclic(recipe)?;

        let outcome = if snapshot.iter().any(|r| r.id == recipe.id) {
            self.recipes.update_recipe(recipe).await?;
            SaveOutcome::Updated
        } else {
            self.recipes.add_recipe(recipe).await?;
            SaveOutcome::Created
        };

        info!(
            recipe_id = %recipe.id,
            outcome = ?outcome,
            sub_recipes = recipe.sub_recipes.len(),
            "Saved recipe"
        );
        Ok(outcome)
    }

    /// Delete a recipe nothing else nests
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` for an unknown id, `ResourceInUse` when other recipes
    /// still reference it as a sub-recipe
    pub async fn delete_recipe(&self, recipe_id: &str) -> AppResult<()> {
        let _write = self.writes.lock().await;
        let snapshot = self.recipes.get_all_recipes().await?;
        if !snapshot.iter().any(|r| r.id == recipe_id) {
            return Err(AppError::not_found(format!("Recipe '{recipe_id}'")));
        }

        let parents: Vec<&str> = snapshot
            .iter()
            .filter(|r| r.sub_recipe_ids().any(|id| id == recipe_id))
            .map(|r| r.id.as_str())
            .collect();
        if !parents.is_empty() {
            return Err(AppError::new(
                ErrorCode::ResourceInUse,
                format!(
                    "Recipe '{recipe_id}' is used as a sub-recipe by {} recipe(s)",
                    parents.len()
                ),
            )
            .with_resource_id(recipe_id)
            .with_details(json!({ "referenced_by": parents })));
        }

        self.recipes.delete_recipe(recipe_id).await?;
        info!(recipe_id, "Deleted recipe");
        Ok(())
    }

    /// Excluded ids, depth, and safe candidates for editing `recipe_id`
    ///
    /// An id not yet stored (a recipe being created) excludes only itself.
    ///
    /// # Errors
    ///
    /// Storage errors only
    pub async fn sub_recipe_picker(&self, recipe_id: &str) -> AppResult<SubRecipePicker> {
        let snapshot = self.recipes.get_all_recipes().await?;
        let graph = RecipeGraph::new(&snapshot);

        let excluded_ids = graph.excluded_ids(recipe_id);
        let depth = graph.depth(recipe_id, self.config.picker_max_depth);

        let mut candidates: Vec<SubRecipeCandidate> = snapshot
            .iter()
            .filter(|r| !excluded_ids.contains(&r.id))
            .map(|r| SubRecipeCandidate {
                id: r.id.clone(),
                name: r.name.clone(),
            })
            .collect();
        candidates.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(
            recipe_id,
            excluded = excluded_ids.len(),
            candidates = candidates.len(),
            depth,
            "Built sub-recipe picker"
        );

        Ok(SubRecipePicker {
            recipe_id: recipe_id.to_owned(),
            excluded_ids,
            depth,
            at_max_depth: depth >= self.config.picker_max_depth,
            candidates,
        })
    }

    /// Import a loosely typed recipe under a fresh id and store it
    ///
    /// # Errors
    ///
    /// The import issues as `InvalidInput` (or `CircularReference`), plus any
    /// error from [`Self::save_recipe`]
    pub async fn import_recipe(&self, imported: &ImportedRecipe) -> AppResult<ImportOutcome> {
        let (recipes, ingredients) = tokio::try_join!(
            self.recipes.get_all_recipes(),
            self.ingredients.get_all_ingredients()
        )?;

        let outcome =
            RecipeImporter::new(&ingredients, &recipes).import(self.ids.next_id(), imported)?;
        self.save_recipe(&outcome.recipe).await?;
        Ok(outcome)
    }
}
