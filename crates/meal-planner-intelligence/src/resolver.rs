// ABOUTME: Expands a recipe at a serving count into flat scaled ingredient quantities
// ABOUTME: Recurses through sub-recipes, records skipped references, and cuts off runaway depth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use meal_planner_core::constants::graph::MAX_RESOLUTION_DEPTH;
use meal_planner_core::models::{is_positive, MeasurementUnit, RecipeIngredient};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{RecipeGraph, RecipeGraphError};

/// One scaled ingredient contribution, not yet merged with others
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIngredient {
    /// Library ingredient id, `None` for free-text lines
    pub ingredient_id: Option<String>,
    /// Label carried by the recipe line
    pub display_name: Option<String>,
    /// Scaled quantity
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: MeasurementUnit,
}

impl ResolvedIngredient {
    fn scaled(line: &RecipeIngredient, ratio: f64) -> Self {
        Self {
            ingredient_id: line.ingredient_id.clone(),
            display_name: line.display_name.clone(),
            quantity: line.quantity * ratio,
            unit: line.unit,
        }
    }
}

/// A reference the resolver skipped instead of expanding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionDiagnostic {
    /// The referenced recipe is not in the snapshot
    MissingRecipe {
        /// Id that failed to resolve
        recipe_id: String,
        /// Parent recipe for sub-recipe edges, `None` for the top-level reference
        referenced_from: Option<String>,
    },
    /// Requested servings are non-positive or the recipe yields zero servings
    InvalidServings {
        /// Recipe that was skipped
        recipe_id: String,
        /// Offending serving count
        servings: f64,
    },
    /// An ingredient line has a non-positive quantity
    InvalidQuantity {
        /// Recipe owning the line
        recipe_id: String,
        /// Position of the line in the recipe
        line: usize,
        /// Offending quantity
        quantity: f64,
    },
}

/// Flat contributions plus everything that was skipped on the way
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Unmerged contributions in expansion order
    pub items: Vec<ResolvedIngredient>,
    /// Skipped references
    pub diagnostics: Vec<ResolutionDiagnostic>,
}

/// Expands recipe references against an indexed snapshot
#[derive(Debug, Clone, Copy)]
pub struct IngredientQuantityResolver<'g, 'a> {
    graph: &'g RecipeGraph<'a>,
    max_depth: usize,
}

impl<'g, 'a> IngredientQuantityResolver<'g, 'a> {
    /// Resolver with the default depth cutoff
    #[must_use]
    pub const fn new(graph: &'g RecipeGraph<'a>) -> Self {
        Self {
            graph,
            max_depth: MAX_RESOLUTION_DEPTH,
        }
    }

    /// Override the depth cutoff
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand `recipe_id` at `servings` into flat scaled contributions
    ///
    /// # Errors
    ///
    /// Returns [`RecipeGraphError::DepthExceeded`] naming the recipe where nesting went
    /// past the cutoff, which only happens when the stored sub-recipes form a cycle
    pub fn resolve(&self, recipe_id: &str, servings: f64) -> Result<Resolution, RecipeGraphError> {
        let mut resolution = Resolution::default();
        self.expand(recipe_id, servings, None, 1, &mut resolution)?;

        debug!(
            recipe_id,
            servings,
            items = resolution.items.len(),
            diagnostics = resolution.diagnostics.len(),
            "Resolved recipe ingredients"
        );
        Ok(resolution)
    }

    fn expand(
        &self,
        recipe_id: &str,
        servings: f64,
        parent: Option<&str>,
        depth: usize,
        out: &mut Resolution,
    ) -> Result<(), RecipeGraphError> {
        if depth > self.max_depth {
            return Err(RecipeGraphError::DepthExceeded {
                recipe_id: recipe_id.to_owned(),
                max_depth: self.max_depth,
            });
        }

        let Some(recipe) = self.graph.get(recipe_id) else {
            out.diagnostics.push(ResolutionDiagnostic::MissingRecipe {
                recipe_id: recipe_id.to_owned(),
                referenced_from: parent.map(str::to_owned),
            });
            return Ok(());
        };

        if !is_positive(servings) || recipe.servings == 0 {
            let offending = if recipe.servings == 0 {
                f64::from(recipe.servings)
            } else {
                servings
            };
            out.diagnostics.push(ResolutionDiagnostic::InvalidServings {
                recipe_id: recipe_id.to_owned(),
                servings: offending,
            });
            return Ok(());
        }

        let ratio = servings / f64::from(recipe.servings);

        for (index, line) in recipe.ingredients.iter().enumerate() {
            if !is_positive(line.quantity) {
                out.diagnostics.push(ResolutionDiagnostic::InvalidQuantity {
                    recipe_id: recipe_id.to_owned(),
                    line: index,
                    quantity: line.quantity,
                });
                continue;
            }
            out.items.push(ResolvedIngredient::scaled(line, ratio));
        }

        for sub in &recipe.sub_recipes {
            self.expand(
                &sub.recipe_id,
                sub.servings * ratio,
                Some(recipe_id),
                depth + 1,
                out,
            )?;
        }

        Ok(())
    }
}
