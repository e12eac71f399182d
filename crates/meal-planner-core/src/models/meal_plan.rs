// ABOUTME: Meal plan models for scheduled meals on calendar dates
// ABOUTME: MealSlot, the recipe/custom MealPlanKind variant, and inclusive DateRange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult, ErrorCode};

/// Time of day a meal is scheduled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

/// What a scheduled meal consists of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MealPlanKind {
    /// Cook a recipe at the given number of servings
    Recipe {
        /// Recipe to cook
        recipe_id: String,
        /// Servings to cook (must be positive)
        servings: f64,
    },
    /// Free-text entry ("leftovers", "eat out") that needs no shopping
    Custom {
        /// What the meal is
        description: String,
    },
}

/// One scheduled meal slot on a calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    /// Opaque unique id supplied by the storage collaborator
    pub id: String,
    /// Calendar date (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Meal slot
    pub slot: MealSlot,
    /// Recipe or custom entry
    #[serde(flatten)]
    pub kind: MealPlanKind,
}

impl MealPlan {
    /// Schedule `recipe_id` at `servings`
    #[must_use]
    pub fn recipe(
        id: impl Into<String>,
        date: NaiveDate,
        slot: MealSlot,
        recipe_id: impl Into<String>,
        servings: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            slot,
            kind: MealPlanKind::Recipe {
                recipe_id: recipe_id.into(),
                servings,
            },
        }
    }

    /// Schedule a free-text meal
    #[must_use]
    pub fn custom(
        id: impl Into<String>,
        date: NaiveDate,
        slot: MealSlot,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            slot,
            kind: MealPlanKind::Custom {
                description: description.into(),
            },
        }
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Check `start <= end`; deserialized ranges are not validated on construction
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `start` is after `end`
    pub fn validate(&self) -> AppResult<()> {
        if self.start > self.end {
            return Err(AppError::new(
                ErrorCode::InvalidInput,
                format!(
                    "Date range start {} is after end {}",
                    self.start, self.end
                ),
            ));
        }
        Ok(())
    }

    /// Whether `date` lies within the range, both ends inclusive
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both ends
    #[must_use]
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
