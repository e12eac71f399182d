// ABOUTME: Recipe models with ingredient lines and sub-recipe references
// ABOUTME: Includes field-level validation applied before a recipe is persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

use super::unit::MeasurementUnit;
use crate::errors::{AppError, AppResult, ErrorCode};

/// One ingredient line of a recipe, quantified at the recipe's base servings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Library ingredient id; `None` for free-text lines with no library match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<String>,
    /// Amount at the recipe's base servings (must be positive)
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: MeasurementUnit,
    /// Optional label overriding the library name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl RecipeIngredient {
    /// Line referencing a library ingredient
    #[must_use]
    pub fn library(ingredient_id: impl Into<String>, quantity: f64, unit: MeasurementUnit) -> Self {
        Self {
            ingredient_id: Some(ingredient_id.into()),
            quantity,
            unit,
            display_name: None,
        }
    }

    /// Free-text line with no library ingredient behind it
    #[must_use]
    pub fn free_text(name: impl Into<String>, quantity: f64, unit: MeasurementUnit) -> Self {
        Self {
            ingredient_id: None,
            quantity,
            unit,
            display_name: Some(name.into()),
        }
    }

    /// Set the display label
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Reference from one recipe to another, scaled to a number of the sub-recipe's servings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRecipeRef {
    /// Id of the referenced recipe
    pub recipe_id: String,
    /// Servings of the sub-recipe needed per batch of the parent (must be positive)
    pub servings: f64,
    /// Optional label shown in the parent recipe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl SubRecipeRef {
    /// Reference `recipe_id` at `servings`
    #[must_use]
    pub fn new(recipe_id: impl Into<String>, servings: f64) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            servings,
            display_name: None,
        }
    }
}

/// A recipe snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque unique id supplied by the storage collaborator
    pub id: String,
    /// Recipe name
    pub name: String,
    /// Number of servings the ingredient quantities yield
    pub servings: u32,
    /// Own ingredient lines
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    /// Nested recipes
    #[serde(default)]
    pub sub_recipes: Vec<SubRecipeRef>,
}

impl Recipe {
    /// Create a recipe with no lines
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, servings: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            servings,
            ingredients: Vec::new(),
            sub_recipes: Vec::new(),
        }
    }

    /// Append an ingredient line
    #[must_use]
    pub fn with_ingredient(mut self, line: RecipeIngredient) -> Self {
        self.ingredients.push(line);
        self
    }

    /// Append a sub-recipe reference
    #[must_use]
    pub fn with_sub_recipe(mut self, sub_recipe: SubRecipeRef) -> Self {
        self.sub_recipes.push(sub_recipe);
        self
    }

    /// Ids of the recipes this recipe nests, in declaration order
    pub fn sub_recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.sub_recipes.iter().map(|s| s.recipe_id.as_str())
    }

    /// Field-level validation
    ///
    /// Graph-level checks (cycles) need the rest of the recipe collection and live
    /// in the graph analyzer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput`/`ValueOutOfRange` describing the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Recipe name must not be empty",
            )
            .with_resource_id(&self.id));
        }
        if self.servings == 0 {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("Recipe '{}' must yield at least one serving", self.name),
            )
            .with_resource_id(&self.id));
        }

        for (index, line) in self.ingredients.iter().enumerate() {
            if !is_positive(line.quantity) {
                return Err(AppError::new(
                    ErrorCode::ValueOutOfRange,
                    format!(
                        "Ingredient line {} of '{}' has non-positive quantity {}",
                        index + 1,
                        self.name,
                        line.quantity
                    ),
                )
                .with_resource_id(&self.id));
            }
            let has_name = line
                .display_name
                .as_deref()
                .is_some_and(|n| !n.trim().is_empty());
            if line.ingredient_id.is_none() && !has_name {
                return Err(AppError::invalid_input(format!(
                    "Ingredient line {} of '{}' needs an ingredient id or a name",
                    index + 1,
                    self.name
                ))
                .with_resource_id(&self.id));
            }
        }

        for sub in &self.sub_recipes {
            if !is_positive(sub.servings) {
                return Err(AppError::new(
                    ErrorCode::ValueOutOfRange,
                    format!(
                        "Sub-recipe '{}' of '{}' has non-positive servings {}",
                        sub.recipe_id, self.name, sub.servings
                    ),
                )
                .with_resource_id(&self.id));
            }
        }

        Ok(())
    }
}

/// Finite and strictly greater than zero
#[must_use]
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
