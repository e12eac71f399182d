// ABOUTME: Sub-recipe graph analysis: cycle detection, picker exclusions, and nesting depth
// ABOUTME: RecipeGraph indexes a recipe snapshot by id for the analyzer and the quantity resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Recipe Graph Analyzer
//!
//! Recipes reference other recipes as sub-recipes. Those edges must stay acyclic,
//! and the checks here are what keeps them that way before a recipe is saved:
//!
//! - [`would_create_circular`]: would adding `candidate` under `recipe` close a loop?
//! - [`get_excluded_recipe_ids`]: every recipe a sub-recipe picker must hide
//! - [`get_recipe_depth`]: longest nesting chain, capped for UI display
//! - [`ensure_acyclic`]: write-time guard over all edges of a recipe
//!
//! References to recipes missing from the snapshot are treated as leaves.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use meal_planner_core::errors::{AppError, ErrorCode};
use meal_planner_core::models::Recipe;
use thiserror::Error;
use tracing::debug;

/// Sub-recipe graph errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeGraphError {
    /// Nesting `sub_recipe_id` under `recipe_id` closes a loop
    #[error("Adding sub-recipe '{sub_recipe_id}' to recipe '{recipe_id}' would create a circular reference")]
    CircularReference {
        /// Recipe being edited
        recipe_id: String,
        /// Offending sub-recipe
        sub_recipe_id: String,
    },
    /// Expansion went deeper than the cutoff; the stored graph contains a cycle
    #[error("Recipe '{recipe_id}' expands deeper than {max_depth} levels; stored sub-recipes are circular")]
    DepthExceeded {
        /// Recipe whose expansion was aborted
        recipe_id: String,
        /// Cutoff that was hit
        max_depth: usize,
    },
}

impl From<RecipeGraphError> for AppError {
    fn from(error: RecipeGraphError) -> Self {
        let (code, recipe_id) = match &error {
            RecipeGraphError::CircularReference { recipe_id, .. } => {
                (ErrorCode::CircularReference, recipe_id.clone())
            }
            RecipeGraphError::DepthExceeded { recipe_id, .. } => {
                (ErrorCode::DataIntegrity, recipe_id.clone())
            }
        };
        Self::new(code, error.to_string())
            .with_resource_id(recipe_id)
            .with_source(error)
    }
}

/// Adjacency index over a recipe snapshot
///
/// When the snapshot holds two recipes with the same id, the later one wins.
#[derive(Debug, Clone, Default)]
pub struct RecipeGraph<'a> {
    recipes: HashMap<&'a str, &'a Recipe>,
}

impl<'a> RecipeGraph<'a> {
    /// Index `recipes` by id
    #[must_use]
    pub fn new(recipes: &'a [Recipe]) -> Self {
        Self {
            recipes: recipes.iter().map(|r| (r.id.as_str(), r)).collect(),
        }
    }

    /// Look up a recipe by id
    #[must_use]
    pub fn get(&self, recipe_id: &str) -> Option<&'a Recipe> {
        self.recipes.get(recipe_id).copied()
    }

    fn children(&self, recipe_id: &str) -> impl Iterator<Item = &'a str> {
        self.get(recipe_id)
            .into_iter()
            .flat_map(|recipe| recipe.sub_recipes.iter().map(|s| s.recipe_id.as_str()))
    }

    /// True on self-reference or when `candidate_id` already reaches `recipe_id`
    #[must_use]
    pub fn would_create_circular(&self, recipe_id: &str, candidate_id: &str) -> bool {
        if recipe_id == candidate_id {
            return true;
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![candidate_id];
        while let Some(current) = stack.pop() {
            if current == recipe_id {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.children(current).filter(|c| !visited.contains(c)));
        }
        false
    }

    /// `recipe_id` plus every indexed recipe that reaches it through sub-recipe edges
    ///
    /// Those are exactly the candidates for which [`Self::would_create_circular`] is
    /// true, found with one reverse breadth-first walk instead of one search each.
    #[must_use]
    pub fn excluded_ids(&self, recipe_id: &str) -> BTreeSet<String> {
        let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
        for (&id, recipe) in &self.recipes {
            for child in recipe.sub_recipe_ids() {
                parents.entry(child).or_default().push(id);
            }
        }

        let mut excluded: BTreeSet<String> = BTreeSet::new();
        excluded.insert(recipe_id.to_owned());
        let mut queue: VecDeque<&str> = VecDeque::from([recipe_id]);
        while let Some(current) = queue.pop_front() {
            for &parent in parents.get(current).into_iter().flatten() {
                if excluded.insert(parent.to_owned()) {
                    queue.push_back(parent);
                }
            }
        }

        debug!(recipe_id, excluded = excluded.len(), "Computed sub-recipe exclusions");
        excluded
    }

    /// Distinct recipes on the deepest chain from `recipe_id`, capped at `max_depth`
    ///
    /// A leaf recipe has depth 1, a recipe missing from the snapshot depth 0.
    #[must_use]
    pub fn depth(&self, recipe_id: &str, max_depth: usize) -> usize {
        self.depth_from(recipe_id, &HashSet::new(), max_depth)
    }

    fn depth_from(&self, recipe_id: &str, visited: &HashSet<&'a str>, max_depth: usize) -> usize {
        if visited.contains(recipe_id) || visited.len() >= max_depth {
            return visited.len();
        }
        let Some(recipe) = self.get(recipe_id) else {
            return visited.len();
        };

        // each branch gets its own copy so siblings do not see each other's nodes
        let mut branch = visited.clone();
        branch.insert(recipe.id.as_str());
        recipe
            .sub_recipe_ids()
            .map(|child| self.depth_from(child, &branch, max_depth))
            .fold(branch.len(), usize::max)
    }

    /// Fail on the first sub-recipe edge of `recipe` that would close a loop
    ///
    /// # Errors
    ///
    /// Returns [`RecipeGraphError::CircularReference`] naming the offending edge
    pub fn ensure_acyclic(&self, recipe: &Recipe) -> Result<(), RecipeGraphError> {
        for sub_recipe_id in recipe.sub_recipe_ids() {
            if self.would_create_circular(&recipe.id, sub_recipe_id) {
                return Err(RecipeGraphError::CircularReference {
                    recipe_id: recipe.id.clone(),
                    sub_recipe_id: sub_recipe_id.to_owned(),
                });
            }
        }
        Ok(())
    }
}

/// Would nesting `candidate_id` under `recipe_id` create a cycle?
#[must_use]
pub fn would_create_circular(recipe_id: &str, candidate_id: &str, recipes: &[Recipe]) -> bool {
    RecipeGraph::new(recipes).would_create_circular(recipe_id, candidate_id)
}

/// Recipe ids a sub-recipe picker for `recipe_id` must not offer
#[must_use]
pub fn get_excluded_recipe_ids(recipe_id: &str, recipes: &[Recipe]) -> BTreeSet<String> {
    RecipeGraph::new(recipes).excluded_ids(recipe_id)
}

/// Nesting depth of `recipe_id`, capped at `max_depth`
///
/// Callers without a preference pass
/// [`meal_planner_core::constants::graph::DEFAULT_PICKER_MAX_DEPTH`].
#[must_use]
pub fn get_recipe_depth(recipe_id: &str, recipes: &[Recipe], max_depth: usize) -> usize {
    RecipeGraph::new(recipes).depth(recipe_id, max_depth)
}

/// Write-time guard: check every sub-recipe edge of `recipe` against the stored snapshot
///
/// # Errors
///
/// Returns [`RecipeGraphError::CircularReference`] on the first edge that closes a loop
pub fn ensure_acyclic(recipe: &Recipe, recipes: &[Recipe]) -> Result<(), RecipeGraphError> {
    RecipeGraph::new(recipes).ensure_acyclic(recipe)
}
