// ABOUTME: Application constants for unit conversion, graph traversal, and grocery output
// ABOUTME: Central place for numeric factors and labels shared across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Shared constants. Runtime-tunable values have matching fields in the planner
//! configuration; the values here are their defaults.

/// Unit conversion factors within a measurement family
pub mod units {
    /// Grams per kilogram
    pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

    /// Milliliters per liter
    pub const MILLILITERS_PER_LITER: f64 = 1000.0;

    /// Quantity (in the canonical unit) at which consolidation switches to the coarser unit
    pub const CONSOLIDATION_THRESHOLD: f64 = 1000.0;
}

/// Sub-recipe graph traversal limits
pub mod graph {
    /// Default cap used by the sub-recipe picker's nesting-depth heuristic
    pub const DEFAULT_PICKER_MAX_DEPTH: usize = 2;

    /// Recursion cutoff for ingredient expansion; exceeding it means the stored graph is cyclic
    pub const MAX_RESOLUTION_DEPTH: usize = 32;
}

/// Grocery list output labels
pub mod grocery {
    /// Display name prefix used when an ingredient id has no library entry
    pub const UNKNOWN_INGREDIENT_LABEL: &str = "Unknown ingredient";
}
