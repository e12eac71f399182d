// ABOUTME: Grocery list models produced by aggregation and handed to storage
// ABOUTME: GroceryList header, GroceryItem lines, and the item's ingredient reference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ingredient::IngredientCategory;
use super::meal_plan::DateRange;
use super::unit::MeasurementUnit;

/// Grocery list header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    /// Fresh id assigned at generation time
    pub id: String,
    /// User-facing list name
    pub name: String,
    /// Meals covered by the list
    pub date_range: DateRange,
    /// Generation timestamp
    pub created_at: DateTime<Utc>,
}

/// What a grocery item refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroceryItemRef {
    /// A library ingredient
    Library {
        /// Library ingredient id
        ingredient_id: String,
    },
    /// Free text with no library match
    FreeText {
        /// Normalized name used for merging
        name: String,
    },
}

impl GroceryItemRef {
    /// Library ingredient id, if any
    #[must_use]
    pub fn ingredient_id(&self) -> Option<&str> {
        match self {
            Self::Library { ingredient_id } => Some(ingredient_id),
            Self::FreeText { .. } => None,
        }
    }
}

/// One line of a grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Fresh id assigned at generation time
    pub id: String,
    /// Owning list
    pub list_id: String,
    /// Ingredient identity
    pub ingredient: GroceryItemRef,
    /// Display name
    pub name: String,
    /// Amount to buy (positive)
    pub quantity: f64,
    /// Display unit chosen by consolidation
    pub unit: MeasurementUnit,
    /// Store section
    pub category: IngredientCategory,
    /// Checked off by the shopper
    pub checked: bool,
    /// Meal plans that contributed to this line
    pub meal_plan_ids: BTreeSet<String>,
}
