// ABOUTME: Shared ingredient library models referenced by id from recipes
// ABOUTME: Ingredient and the coarse grocery-store section used to group shopping lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::fmt;

use super::unit::MeasurementUnit;

/// Grocery-store section an ingredient is shelved in
///
/// Declaration order is the order sections appear on a generated shopping list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum IngredientCategory {
    /// Fruit and vegetables
    Produce,
    /// Meat and poultry
    Meat,
    /// Fish and shellfish
    Seafood,
    /// Milk, cheese, eggs
    Dairy,
    /// Bread and baked goods
    Bakery,
    /// Dry goods, cans, oils, baking supplies
    Pantry,
    /// Herbs, spices, seasonings
    Spices,
    /// Frozen goods
    Frozen,
    /// Drinks
    Beverages,
    /// Anything else, and the fallback for unknown ingredients
    #[default]
    Other,
}

impl IngredientCategory {
    /// Parse a category, mapping anything unrecognized to `Other`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "produce" | "vegetables" | "fruit" => Self::Produce,
            "meat" | "poultry" => Self::Meat,
            "seafood" | "fish" => Self::Seafood,
            "dairy" => Self::Dairy,
            "bakery" | "bread" => Self::Bakery,
            "pantry" | "dry goods" => Self::Pantry,
            "spices" | "herbs" | "seasoning" => Self::Spices,
            "frozen" => Self::Frozen,
            "beverages" | "drinks" => Self::Beverages,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Produce => "Produce",
            Self::Meat => "Meat",
            Self::Seafood => "Seafood",
            Self::Dairy => "Dairy",
            Self::Bakery => "Bakery",
            Self::Pantry => "Pantry",
            Self::Spices => "Spices",
            Self::Frozen => "Frozen",
            Self::Beverages => "Beverages",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Entry in the shared ingredient library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Opaque unique id supplied by the storage collaborator
    pub id: String,
    /// Display name
    pub name: String,
    /// Store section
    pub category: IngredientCategory,
    /// Unit the ingredient is usually bought in
    pub canonical_unit: MeasurementUnit,
}

impl Ingredient {
    /// Create a library ingredient
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: IngredientCategory,
        canonical_unit: MeasurementUnit,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            canonical_unit,
        }
    }
}
