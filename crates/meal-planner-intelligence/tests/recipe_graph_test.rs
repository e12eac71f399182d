// ABOUTME: Integration tests for sub-recipe cycle detection, picker exclusions, and depth
// ABOUTME: Covers would_create_circular, get_excluded_recipe_ids, get_recipe_depth, ensure_acyclic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::BTreeSet;

use meal_planner_core::errors::ErrorCode;
use meal_planner_core::models::{Recipe, SubRecipeRef};
use meal_planner_core::AppError;
use meal_planner_intelligence::{
    ensure_acyclic, get_excluded_recipe_ids, get_recipe_depth, would_create_circular,
    RecipeGraph, RecipeGraphError,
};

// ============================================================================
// Fixtures
// ============================================================================

fn recipe(id: &str, children: &[&str]) -> Recipe {
    children
        .iter()
        .fold(Recipe::new(id, format!("Recipe {id}"), 2), |r, child| {
            r.with_sub_recipe(SubRecipeRef::new(*child, 1.0))
        })
}

/// A → B → C, plus an unrelated D
fn chain_with_island() -> Vec<Recipe> {
    vec![
        recipe("A", &["B"]),
        recipe("B", &["C"]),
        recipe("C", &[]),
        recipe("D", &[]),
    ]
}

fn ids(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

// ============================================================================
// would_create_circular
// ============================================================================

#[test]
fn test_candidate_reaching_recipe_is_circular() {
    let recipes = chain_with_island();
    assert!(would_create_circular("C", "A", &recipes));
    assert!(would_create_circular("C", "B", &recipes));
}

#[test]
fn test_unrelated_candidate_is_not_circular() {
    let recipes = chain_with_island();
    assert!(!would_create_circular("A", "D", &recipes));
    assert!(!would_create_circular("A", "C", &recipes));
}

#[test]
fn test_self_reference_is_circular() {
    let recipes = chain_with_island();
    assert!(would_create_circular("A", "A", &recipes));
    assert!(would_create_circular("new", "new", &[]));
}

#[test]
fn test_missing_candidate_is_a_leaf() {
    let recipes = chain_with_island();
    assert!(!would_create_circular("A", "ghost", &recipes));
}

#[test]
fn test_stored_cycle_does_not_hang() {
    let recipes = vec![recipe("X", &["Y"]), recipe("Y", &["X"]), recipe("Z", &[])];
    assert!(!would_create_circular("Z", "X", &recipes));
    assert!(would_create_circular("X", "Y", &recipes));
}

// ============================================================================
// get_excluded_recipe_ids
// ============================================================================

#[test]
fn test_excluded_ids_for_chain_tail() {
    let recipes = chain_with_island();
    assert_eq!(get_excluded_recipe_ids("C", &recipes), ids(&["A", "B", "C"]));
}

#[test]
fn test_excluded_ids_for_chain_head_is_only_itself() {
    let recipes = chain_with_island();
    assert_eq!(get_excluded_recipe_ids("A", &recipes), ids(&["A"]));
    assert_eq!(get_excluded_recipe_ids("D", &recipes), ids(&["D"]));
}

#[test]
fn test_excluded_ids_agree_with_circular_check() {
    let recipes = vec![
        recipe("A", &["B", "E"]),
        recipe("B", &["C"]),
        recipe("C", &[]),
        recipe("E", &["C"]),
        recipe("F", &["A"]),
        recipe("G", &[]),
    ];
    let graph = RecipeGraph::new(&recipes);
    for target in ["A", "B", "C", "E", "F", "G"] {
        let excluded = graph.excluded_ids(target);
        for candidate in ["A", "B", "C", "E", "F", "G"] {
            assert_eq!(
                excluded.contains(candidate),
                graph.would_create_circular(target, candidate),
                "target {target}, candidate {candidate}"
            );
        }
    }
}

// ============================================================================
// get_recipe_depth
// ============================================================================

#[test]
fn test_depth_is_capped() {
    let recipes = vec![
        recipe("A", &["B"]),
        recipe("B", &["C"]),
        recipe("C", &["D"]),
        recipe("D", &[]),
    ];
    assert_eq!(get_recipe_depth("A", &recipes, 2), 2);
    assert_eq!(get_recipe_depth("A", &recipes, 10), 4);
}

#[test]
fn test_leaf_depth_is_one() {
    let recipes = chain_with_island();
    assert_eq!(get_recipe_depth("D", &recipes, 2), 1);
}

#[test]
fn test_missing_recipe_depth_is_zero() {
    assert_eq!(get_recipe_depth("ghost", &chain_with_island(), 2), 0);
}

#[test]
fn test_depth_takes_deepest_branch() {
    let recipes = vec![
        recipe("root", &["leaf", "mid"]),
        recipe("mid", &["deep"]),
        recipe("deep", &[]),
        recipe("leaf", &[]),
    ];
    assert_eq!(get_recipe_depth("root", &recipes, 5), 3);
}

#[test]
fn test_depth_terminates_on_stored_cycle() {
    let recipes = vec![recipe("X", &["Y"]), recipe("Y", &["X"])];
    assert_eq!(get_recipe_depth("X", &recipes, 10), 2);
}

// ============================================================================
// ensure_acyclic
// ============================================================================

#[test]
fn test_ensure_acyclic_rejects_back_edge() {
    let recipes = chain_with_island();
    let edited = recipe("C", &["A"]);
    let err = ensure_acyclic(&edited, &recipes).unwrap_err();
    assert_eq!(
        err,
        RecipeGraphError::CircularReference {
            recipe_id: "C".to_owned(),
            sub_recipe_id: "A".to_owned(),
        }
    );

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::CircularReference);
    assert_eq!(app.context.resource_id.as_deref(), Some("C"));
}

#[test]
fn test_ensure_acyclic_accepts_new_edges() {
    let recipes = chain_with_island();
    assert!(ensure_acyclic(&recipe("A", &["B", "D"]), &recipes).is_ok());
    assert!(ensure_acyclic(&recipe("new", &["A", "C"]), &recipes).is_ok());
}
