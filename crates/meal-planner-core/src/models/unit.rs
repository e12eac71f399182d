// ABOUTME: Measurement units used by recipe ingredient lines and grocery items
// ABOUTME: Unit families that decide convertibility, and lenient parsing from free text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family a unit belongs to. Only units in the same family with a known factor convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitFamily {
    /// Metric weight (gram, kilogram)
    Weight,
    /// Metric volume (milliliter, liter)
    Volume,
    /// Kitchen spoon and cup measures, kept as-is
    KitchenMeasure,
    /// Countable things (pieces, cloves, cans, ...)
    Count,
}

/// Ingredient measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    /// Weight in grams (canonical weight unit)
    Gram,
    /// Weight in kilograms
    Kilogram,
    /// Volume in milliliters (canonical volume unit)
    Milliliter,
    /// Volume in liters
    Liter,
    /// Teaspoon
    Teaspoon,
    /// Tablespoon
    Tablespoon,
    /// Cup
    Cup,
    /// Pinch
    Pinch,
    /// Whole items (eggs, onions, ...)
    Piece,
    /// Garlic cloves and similar
    Clove,
    /// Canned goods
    Can,
    /// Bunches of herbs or greens
    Bunch,
    /// Packaged goods
    Package,
}

impl MeasurementUnit {
    /// Every supported unit, in declaration order
    pub const ALL: [Self; 13] = [
        Self::Gram,
        Self::Kilogram,
        Self::Milliliter,
        Self::Liter,
        Self::Teaspoon,
        Self::Tablespoon,
        Self::Cup,
        Self::Pinch,
        Self::Piece,
        Self::Clove,
        Self::Can,
        Self::Bunch,
        Self::Package,
    ];

    /// Family this unit belongs to
    #[must_use]
    pub const fn family(&self) -> UnitFamily {
        match self {
            Self::Gram | Self::Kilogram => UnitFamily::Weight,
            Self::Milliliter | Self::Liter => UnitFamily::Volume,
            Self::Teaspoon | Self::Tablespoon | Self::Cup | Self::Pinch => {
                UnitFamily::KitchenMeasure
            }
            Self::Piece | Self::Clove | Self::Can | Self::Bunch | Self::Package => {
                UnitFamily::Count
            }
        }
    }

    /// Serialized name of the unit
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gram => "gram",
            Self::Kilogram => "kilogram",
            Self::Milliliter => "milliliter",
            Self::Liter => "liter",
            Self::Teaspoon => "teaspoon",
            Self::Tablespoon => "tablespoon",
            Self::Cup => "cup",
            Self::Pinch => "pinch",
            Self::Piece => "piece",
            Self::Clove => "clove",
            Self::Can => "can",
            Self::Bunch => "bunch",
            Self::Package => "package",
        }
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let unit = match normalized.as_str() {
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Self::Gram,
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Self::Kilogram,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Self::Milliliter,
            "l" | "liter" | "liters" | "litre" | "litres" => Self::Liter,
            "tsp" | "teaspoon" | "teaspoons" => Self::Teaspoon,
            "tbsp" | "tablespoon" | "tablespoons" => Self::Tablespoon,
            "cup" | "cups" => Self::Cup,
            "pinch" | "pinches" => Self::Pinch,
            "" | "pc" | "pcs" | "piece" | "pieces" | "whole" | "item" | "items" => Self::Piece,
            "clove" | "cloves" => Self::Clove,
            "can" | "cans" | "tin" | "tins" => Self::Can,
            "bunch" | "bunches" => Self::Bunch,
            "pkg" | "package" | "packages" | "pack" | "packs" => Self::Package,
            _ => {
                return Err(format!(
                    "Unknown unit '{}'. Valid units: {}",
                    s.trim(),
                    Self::ALL
                        .iter()
                        .map(Self::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        };
        Ok(unit)
    }
}
