// ABOUTME: Grocery list aggregation across scheduled meals in a date range
// ABOUTME: Resolves each recipe meal, merges by ingredient and canonical unit, consolidates, sorts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Grocery List Aggregator
//!
//! One stateless pass over a snapshot:
//!
//! 1. keep meal plans dated inside the range (both ends inclusive)
//! 2. expand recipe meals through the quantity resolver; custom meals add nothing
//! 3. merge contributions keyed by ingredient identity and canonical unit
//! 4. pick a display unit and a store category per merged line
//! 5. emit the list header and its items in a stable order
//!
//! Missing recipes are skipped and reported as diagnostics. A cyclic sub-recipe
//! graph aborts the whole pass.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use meal_planner_core::constants::grocery::UNKNOWN_INGREDIENT_LABEL;
use meal_planner_core::errors::{AppError, AppResult};
use meal_planner_core::models::{
    DateRange, GroceryItem, GroceryItemRef, GroceryList, IdGenerator, Ingredient,
    IngredientCategory, MealPlan, MealPlanKind, MeasurementUnit, Recipe, UuidIdGenerator,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::graph::RecipeGraph;
use crate::resolver::{IngredientQuantityResolver, ResolutionDiagnostic, ResolvedIngredient};
use crate::units::{normalize_unit_for_consolidation, UnitConverter};

/// Lowercase, trim, and collapse inner whitespace
///
/// Shared by the aggregator's free-text merge key and the recipe importer's
/// ingredient and sub-recipe lookups.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A resolver diagnostic tagged with the meal plan that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDiagnostic {
    /// Meal plan being expanded
    pub meal_plan_id: String,
    /// What was skipped
    #[serde(flatten)]
    pub diagnostic: ResolutionDiagnostic,
}

/// Aggregation output ready for the storage collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedGroceryList {
    /// List header
    pub list: GroceryList,
    /// Merged items, ordered by category, name, then unit
    pub items: Vec<GroceryItem>,
    /// Soft failures met along the way
    pub diagnostics: Vec<MealPlanDiagnostic>,
}

/// Merge bucket for one (ingredient, canonical unit) key
struct MergedLine {
    display_name: String,
    category: IngredientCategory,
    quantity: f64,
    meal_plan_ids: BTreeSet<String>,
}

/// Builds grocery lists from meal plan, recipe, and ingredient snapshots
#[derive(Clone)]
pub struct GroceryListAggregator {
    converter: UnitConverter,
    max_resolution_depth: usize,
    ids: Arc<dyn IdGenerator>,
}

impl Default for GroceryListAggregator {
    fn default() -> Self {
        Self::new(&PlannerConfig::default(), Arc::new(UuidIdGenerator))
    }
}

impl GroceryListAggregator {
    /// Aggregator using `config` for conversion and depth, `ids` for fresh record ids
    #[must_use]
    pub fn new(config: &PlannerConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            converter: UnitConverter::from_config(config),
            max_resolution_depth: config.max_resolution_depth,
            ids,
        }
    }

    /// Aggregate every meal in `date_range` into a named grocery list
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name or a reversed range, and
    /// `DataIntegrity` when sub-recipe expansion runs past the depth cutoff
    pub fn generate(
        &self,
        date_range: DateRange,
        name: &str,
        meal_plans: &[MealPlan],
        recipes: &[Recipe],
        ingredients: &[Ingredient],
    ) -> AppResult<GeneratedGroceryList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Grocery list name must not be empty"));
        }
        date_range.validate()?;

        let graph = RecipeGraph::new(recipes);
        let resolver =
            IngredientQuantityResolver::new(&graph).with_max_depth(self.max_resolution_depth);
        let library: HashMap<&str, &Ingredient> =
            ingredients.iter().map(|i| (i.id.as_str(), i)).collect();

        let mut merged: HashMap<(GroceryItemRef, MeasurementUnit), MergedLine> = HashMap::new();
        let mut diagnostics = Vec::new();
        let mut meals_used = 0_usize;

        for plan in meal_plans.iter().filter(|p| date_range.contains(p.date)) {
            let MealPlanKind::Recipe {
                recipe_id,
                servings,
            } = &plan.kind
            else {
                continue;
            };
            meals_used += 1;

            let resolution = resolver.resolve(recipe_id, *servings).map_err(|e| {
                AppError::from(e).with_details(json!({ "meal_plan_id": plan.id }))
            })?;

            diagnostics.extend(resolution.diagnostics.into_iter().map(|diagnostic| {
                MealPlanDiagnostic {
                    meal_plan_id: plan.id.clone(),
                    diagnostic,
                }
            }));

            for contribution in resolution.items {
                self.merge(&mut merged, &library, &plan.id, contribution)?;
            }
        }

        let list = GroceryList {
            id: self.ids.next_id(),
            name: name.to_owned(),
            date_range,
            created_at: Utc::now(),
        };
        let items = self.finish(&list.id, merged);

        info!(
            list_id = %list.id,
            meals = meals_used,
            items = items.len(),
            diagnostics = diagnostics.len(),
            "Generated grocery list"
        );

        Ok(GeneratedGroceryList {
            list,
            items,
            diagnostics,
        })
    }

    fn merge(
        &self,
        merged: &mut HashMap<(GroceryItemRef, MeasurementUnit), MergedLine>,
        library: &HashMap<&str, &Ingredient>,
        meal_plan_id: &str,
        contribution: ResolvedIngredient,
    ) -> AppResult<()> {
        let canonical_unit = normalize_unit_for_consolidation(contribution.unit);
        let quantity = self
            .converter
            .convert(contribution.quantity, contribution.unit, canonical_unit)?;

        let (key, display_name, category) = match contribution.ingredient_id {
            Some(ingredient_id) => {
                let (display_name, category) = match library.get(ingredient_id.as_str()) {
                    Some(ingredient) => (ingredient.name.clone(), ingredient.category),
                    None => {
                        warn!(ingredient_id, meal_plan_id, "Ingredient missing from library");
                        let label = contribution.display_name.unwrap_or_else(|| {
                            format!("{UNKNOWN_INGREDIENT_LABEL} ({ingredient_id})")
                        });
                        (label, IngredientCategory::Other)
                    }
                };
                (
                    GroceryItemRef::Library { ingredient_id },
                    display_name,
                    category,
                )
            }
            None => {
                let label = contribution
                    .display_name
                    .map(|n| n.trim().to_owned())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| UNKNOWN_INGREDIENT_LABEL.to_owned());
                (
                    GroceryItemRef::FreeText {
                        name: normalize_name(&label),
                    },
                    label,
                    IngredientCategory::Other,
                )
            }
        };

        let line = merged
            .entry((key, canonical_unit))
            .or_insert_with(|| MergedLine {
                display_name,
                category,
                quantity: 0.0,
                meal_plan_ids: BTreeSet::new(),
            });
        line.quantity += quantity;
        line.meal_plan_ids.insert(meal_plan_id.to_owned());
        Ok(())
    }

    fn finish(
        &self,
        list_id: &str,
        merged: HashMap<(GroceryItemRef, MeasurementUnit), MergedLine>,
    ) -> Vec<GroceryItem> {
        let mut lines: Vec<_> = merged
            .into_iter()
            .map(|((ingredient, unit), line)| {
                let (quantity, unit) = self.converter.consolidate(line.quantity, unit);
                (ingredient, line, quantity, unit)
            })
            .collect();

        lines.sort_by(|a, b| {
            a.1.category
                .cmp(&b.1.category)
                .then_with(|| {
                    a.1.display_name
                        .to_lowercase()
                        .cmp(&b.1.display_name.to_lowercase())
                })
                .then_with(|| a.3.cmp(&b.3))
                .then_with(|| a.0.cmp(&b.0))
        });

        debug!(list_id, lines = lines.len(), "Consolidated grocery lines");

        lines
            .into_iter()
            .map(|(ingredient, line, quantity, unit)| GroceryItem {
                id: self.ids.next_id(),
                list_id: list_id.to_owned(),
                ingredient,
                name: line.display_name,
                quantity,
                unit,
                category: line.category,
                checked: false,
                meal_plan_ids: line.meal_plan_ids,
            })
            .collect()
    }
}

/// Aggregate with default settings and UUID ids
///
/// # Errors
///
/// See [`GroceryListAggregator::generate`]
pub fn generate_grocery_list(
    date_range: DateRange,
    name: &str,
    meal_plans: &[MealPlan],
    recipes: &[Recipe],
    ingredients: &[Ingredient],
) -> AppResult<GeneratedGroceryList> {
    GroceryListAggregator::default().generate(date_range, name, meal_plans, recipes, ingredients)
}
