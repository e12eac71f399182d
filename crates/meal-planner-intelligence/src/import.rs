// ABOUTME: Recipe import helper mapping loosely typed recipe data onto the ingredient library
// ABOUTME: Name matching (exact, plural variant, unique containment), unit parsing, sub-recipe lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Recipe Importer
//!
//! Turns an [`ImportedRecipe`] (free-text ingredient names, unit strings, sub-recipes
//! referenced by name) into a [`Recipe`]. Every problem found is collected, so a
//! failed import lists all of them at once.
//!
//! Ingredient names match the library in three passes, using the same normalization
//! as the grocery aggregator's free-text keys:
//!
//! 1. exact normalized name
//! 2. singular/plural variant (`tomatoes` ↔ `tomato`, `berries` ↔ `berry`)
//! 3. a single library name contained in the imported name or containing it
//!
//! Unmatched lines are kept as free-text lines and listed in the [`ImportReport`].

use std::collections::HashMap;

use meal_planner_core::errors::{AppError, ErrorCode};
use meal_planner_core::models::{
    is_positive, Ingredient, MeasurementUnit, Recipe, RecipeIngredient, SubRecipeRef,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::aggregation::normalize_name;
use crate::graph::{RecipeGraph, RecipeGraphError};

/// Recipe as received from an import source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedRecipe {
    /// Recipe name
    pub name: String,
    /// Servings the quantities yield
    pub servings: i64,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<ImportedIngredient>,
    /// Sub-recipes referenced by name
    #[serde(default)]
    pub sub_recipes: Vec<ImportedSubRecipe>,
}

/// Free-text ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedIngredient {
    /// Ingredient name as written
    pub name: String,
    /// Amount
    pub quantity: f64,
    /// Unit as written (`"g"`, `"cups"`, `""` for pieces)
    #[serde(default)]
    pub unit: String,
}

/// Sub-recipe referenced by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedSubRecipe {
    /// Name of an existing recipe, compared case-insensitively
    pub name: String,
    /// Servings of the sub-recipe needed
    pub servings: f64,
}

/// One problem found while importing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportIssue {
    /// Recipe name is blank
    #[error("recipe name is empty")]
    EmptyName,
    /// Servings are not a positive integer
    #[error("servings must be a positive whole number, got {0}")]
    InvalidServings(i64),
    /// Ingredient line has a blank name
    #[error("ingredient line {line} has no name")]
    EmptyIngredientName {
        /// 1-based line number
        line: usize,
    },
    /// Ingredient quantity is not positive
    #[error("ingredient '{name}' has non-positive quantity {quantity}")]
    InvalidQuantity {
        /// Ingredient name as written
        name: String,
        /// Offending quantity
        quantity: f64,
    },
    /// Unit string not in the unit table
    #[error("ingredient '{name}': {reason}")]
    UnknownUnit {
        /// Ingredient name as written
        name: String,
        /// Parser message listing valid units
        reason: String,
    },
    /// No existing recipe has this name
    #[error("sub-recipe '{0}' does not match any recipe")]
    UnknownSubRecipe(String),
    /// Several existing recipes share this name
    #[error("sub-recipe '{0}' matches more than one recipe")]
    AmbiguousSubRecipe(String),
    /// Sub-recipe servings are not positive
    #[error("sub-recipe '{name}' has non-positive servings {servings}")]
    InvalidSubRecipeServings {
        /// Sub-recipe name as written
        name: String,
        /// Offending servings
        servings: f64,
    },
    /// Resulting recipe would nest itself
    #[error("{0}")]
    Circular(RecipeGraphError),
}

/// Import failure listing every issue found
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Recipe import failed with {} issue(s): {}", .issues.len(), join_issues(.issues))]
pub struct ImportError {
    /// Every problem found, in input order
    pub issues: Vec<ImportIssue>,
}

fn join_issues(issues: &[ImportIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ImportError> for AppError {
    fn from(error: ImportError) -> Self {
        let code = if error
            .issues
            .iter()
            .any(|issue| matches!(issue, ImportIssue::Circular(_)))
        {
            ErrorCode::CircularReference
        } else {
            ErrorCode::InvalidInput
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// How an imported ingredient name was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Same normalized name
    Exact,
    /// Singular/plural variant of the name
    PluralVariant,
    /// The only library name whose words all appear as words of the imported name
    Containment,
}

/// A matched ingredient line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientMatch {
    /// Name as written in the import
    pub imported_name: String,
    /// Library ingredient chosen
    pub ingredient_id: String,
    /// Pass that found it
    pub strategy: MatchStrategy,
}

/// What the importer did with each line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Lines linked to library ingredients
    pub matched: Vec<IngredientMatch>,
    /// Names kept as free text
    pub unmatched: Vec<String>,
}

/// Successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Recipe ready to be saved
    pub recipe: Recipe,
    /// Matching summary
    pub report: ImportReport,
}

/// Maps imported recipes onto an ingredient library and existing recipes
pub struct RecipeImporter<'a> {
    by_name: HashMap<String, &'a Ingredient>,
    library: Vec<(String, &'a Ingredient)>,
    recipes: &'a [Recipe],
}

impl<'a> RecipeImporter<'a> {
    /// Importer over snapshots of the library and the stored recipes
    #[must_use]
    pub fn new(ingredients: &'a [Ingredient], recipes: &'a [Recipe]) -> Self {
        let library: Vec<(String, &Ingredient)> = ingredients
            .iter()
            .map(|i| (normalize_name(&i.name), i))
            .collect();
        let mut by_name = HashMap::new();
        for (name, ingredient) in &library {
            by_name.entry(name.clone()).or_insert(*ingredient);
        }
        Self {
            by_name,
            library,
            recipes,
        }
    }

    /// Find the library ingredient for an imported name
    #[must_use]
    pub fn match_ingredient(&self, name: &str) -> Option<(&'a Ingredient, MatchStrategy)> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }

        if let Some(ingredient) = self.by_name.get(&normalized).copied() {
            return Some((ingredient, MatchStrategy::Exact));
        }

        if let Some(ingredient) = plural_variants(&normalized)
            .iter()
            .find_map(|variant| self.by_name.get(variant).copied())
        {
            return Some((ingredient, MatchStrategy::PluralVariant));
        }

        let words: Vec<&str> = normalized.split(' ').collect();
        let mut contained = self
            .library
            .iter()
            .filter(|(library_name, _)| contains_all_words(&words, library_name));
        match (contained.next(), contained.next()) {
            (Some((_, ingredient)), None) => Some((*ingredient, MatchStrategy::Containment)),
            _ => None,
        }
    }

    /// Convert `imported` into a recipe with id `recipe_id`
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] listing every invalid field, unknown unit, unknown
    /// sub-recipe, and any sub-recipe edge that would close a loop
    pub fn import(
        &self,
        recipe_id: impl Into<String>,
        imported: &ImportedRecipe,
    ) -> Result<ImportOutcome, ImportError> {
        let mut issues = Vec::new();
        let mut report = ImportReport::default();

        let name = imported.name.trim();
        if name.is_empty() {
            issues.push(ImportIssue::EmptyName);
        }
        let servings = u32::try_from(imported.servings)
            .ok()
            .filter(|s| *s > 0)
            .unwrap_or_else(|| {
                issues.push(ImportIssue::InvalidServings(imported.servings));
                0
            });

        let mut recipe = Recipe::new(recipe_id, name, servings);

        for (index, line) in imported.ingredients.iter().enumerate() {
            if let Some(parsed) = self.import_line(index + 1, line, &mut issues, &mut report) {
                recipe.ingredients.push(parsed);
            }
        }

        for sub in &imported.sub_recipes {
            if let Some(parsed) = self.import_sub_recipe(sub, &mut issues) {
                recipe.sub_recipes.push(parsed);
            }
        }

        if let Err(error) = RecipeGraph::new(self.recipes).ensure_acyclic(&recipe) {
            issues.push(ImportIssue::Circular(error));
        }

        if !issues.is_empty() {
            debug!(recipe = name, issues = issues.len(), "Recipe import rejected");
            return Err(ImportError { issues });
        }

        info!(
            recipe_id = %recipe.id,
            matched = report.matched.len(),
            unmatched = report.unmatched.len(),
            "Imported recipe"
        );
        Ok(ImportOutcome { recipe, report })
    }

    fn import_line(
        &self,
        line_number: usize,
        line: &ImportedIngredient,
        issues: &mut Vec<ImportIssue>,
        report: &mut ImportReport,
    ) -> Option<RecipeIngredient> {
        let name = line.name.trim();
        if name.is_empty() {
            issues.push(ImportIssue::EmptyIngredientName { line: line_number });
            return None;
        }

        let unit = match line.unit.parse::<MeasurementUnit>() {
            Ok(unit) => Some(unit),
            Err(reason) => {
                issues.push(ImportIssue::UnknownUnit {
                    name: name.to_owned(),
                    reason,
                });
                None
            }
        };
        if !is_positive(line.quantity) {
            issues.push(ImportIssue::InvalidQuantity {
                name: name.to_owned(),
                quantity: line.quantity,
            });
            return None;
        }
        let unit = unit?;

        let parsed = match self.match_ingredient(name) {
            Some((ingredient, strategy)) => {
                report.matched.push(IngredientMatch {
                    imported_name: name.to_owned(),
                    ingredient_id: ingredient.id.clone(),
                    strategy,
                });
                RecipeIngredient::library(&ingredient.id, line.quantity, unit)
                    .with_display_name(name)
            }
            None => {
                report.unmatched.push(name.to_owned());
                RecipeIngredient::free_text(name, line.quantity, unit)
            }
        };
        Some(parsed)
    }

    fn import_sub_recipe(
        &self,
        sub: &ImportedSubRecipe,
        issues: &mut Vec<ImportIssue>,
    ) -> Option<SubRecipeRef> {
        let wanted = normalize_name(&sub.name);
        let mut found = self
            .recipes
            .iter()
            .filter(|r| normalize_name(&r.name) == wanted);

        let target = match (found.next(), found.next()) {
            (Some(recipe), None) => recipe,
            (None, _) => {
                issues.push(ImportIssue::UnknownSubRecipe(sub.name.clone()));
                return None;
            }
            (Some(_), Some(_)) => {
                issues.push(ImportIssue::AmbiguousSubRecipe(sub.name.clone()));
                return None;
            }
        };

        if !is_positive(sub.servings) {
            issues.push(ImportIssue::InvalidSubRecipeServings {
                name: sub.name.clone(),
                servings: sub.servings,
            });
            return None;
        }

        let mut reference = SubRecipeRef::new(&target.id, sub.servings);
        reference.display_name = Some(target.name.clone());
        Some(reference)
    }
}

/// Whether every word of `library_name` appears as a whole word in `words`
///
/// A word also matches its singular or plural spelling, so "chopped tomatoes"
/// contains "tomato" while "eggplant" does not contain "egg".
fn contains_all_words(words: &[&str], library_name: &str) -> bool {
    !library_name.is_empty()
        && library_name.split(' ').all(|wanted| {
            words
                .iter()
                .any(|word| *word == wanted || plural_variants(word).iter().any(|v| v == wanted))
        })
}

/// Singular and plural spellings to try for a normalized name
fn plural_variants(name: &str) -> Vec<String> {
    let mut variants = Vec::new();
    if let Some(stem) = name.strip_suffix("ies") {
        variants.push(format!("{stem}y"));
    }
    if let Some(stem) = name.strip_suffix("es") {
        variants.push(stem.to_owned());
    }
    if let Some(stem) = name.strip_suffix('s') {
        variants.push(stem.to_owned());
    }
    if let Some(stem) = name.strip_suffix('y') {
        variants.push(format!("{stem}ies"));
    }
    variants.push(format!("{name}s"));
    variants.push(format!("{name}es"));
    variants.retain(|v| !v.is_empty() && v != name);
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_variants() {
        assert!(plural_variants("berries").contains(&"berry".to_owned()));
        assert!(plural_variants("tomatoes").contains(&"tomato".to_owned()));
        assert!(plural_variants("onion").contains(&"onions".to_owned()));
        assert!(!plural_variants("s").contains(&String::new()));
    }

    #[test]
    fn test_contains_all_words_needs_whole_words() {
        assert!(contains_all_words(&["chopped", "tomatoes"], "tomato"));
        assert!(contains_all_words(&["red", "onion", "diced"], "red onion"));
        assert!(!contains_all_words(&["eggplant"], "egg"));
        assert!(!contains_all_words(&["onion"], "red onion"));
        assert!(!contains_all_words(&["salt"], ""));
    }

    #[test]
    fn test_import_error_lists_every_issue() {
        let error = ImportError {
            issues: vec![
                ImportIssue::EmptyName,
                ImportIssue::UnknownSubRecipe("Pesto".to_owned()),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Recipe import failed with 2 issue(s): recipe name is empty; sub-recipe 'Pesto' does not match any recipe"
        );
    }
}
