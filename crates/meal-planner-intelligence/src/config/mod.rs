// ABOUTME: Planner engine configuration with defaults, environment overrides, and validation
// ABOUTME: Resolution depth cutoff, picker depth cap, consolidation threshold, unit policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Planner engine configuration.
//!
//! Loading follows three steps: start from [`PlannerConfig::default`], apply
//! `MEAL_PLANNER_*` environment overrides, then validate. Parse failures name the
//! offending variable.

mod error;

pub use error::ConfigError;

use meal_planner_core::constants::graph::{DEFAULT_PICKER_MAX_DEPTH, MAX_RESOLUTION_DEPTH};
use meal_planner_core::constants::units::CONSOLIDATION_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

use crate::units::IncompatibleUnitPolicy;

/// Global configuration singleton
static PLANNER_CONFIG: OnceLock<PlannerConfig> = OnceLock::new();

/// Env var overriding [`PlannerConfig::max_resolution_depth`]
pub const ENV_MAX_RESOLUTION_DEPTH: &str = "MEAL_PLANNER_MAX_RESOLUTION_DEPTH";
/// Env var overriding [`PlannerConfig::picker_max_depth`]
pub const ENV_PICKER_MAX_DEPTH: &str = "MEAL_PLANNER_PICKER_MAX_DEPTH";
/// Env var overriding [`PlannerConfig::consolidation_threshold`]
pub const ENV_CONSOLIDATION_THRESHOLD: &str = "MEAL_PLANNER_CONSOLIDATION_THRESHOLD";
/// Env var overriding [`PlannerConfig::incompatible_unit_policy`]
pub const ENV_INCOMPATIBLE_UNIT_POLICY: &str = "MEAL_PLANNER_INCOMPATIBLE_UNIT_POLICY";

/// Tunable settings for the recipe graph and grocery engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Recursion cutoff for sub-recipe expansion
    pub max_resolution_depth: usize,
    /// Depth cap reported to sub-recipe pickers
    pub picker_max_depth: usize,
    /// Canonical quantity at which grams become kilograms and milliliters become liters
    pub consolidation_threshold: f64,
    /// Behavior for conversions with no known factor
    pub incompatible_unit_policy: IncompatibleUnitPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: MAX_RESOLUTION_DEPTH,
            picker_max_depth: DEFAULT_PICKER_MAX_DEPTH,
            consolidation_threshold: CONSOLIDATION_THRESHOLD,
            incompatible_unit_policy: IncompatibleUnitPolicy::PassThrough,
        }
    }
}

impl PlannerConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        PLANNER_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load planner config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable is not Unicode, cannot be parsed, or the
    /// result fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValueOutOfRange`] for a zero depth or a non-positive threshold
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Max resolution depth must be at least 1",
            ));
        }
        if self.picker_max_depth == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Picker max depth must be at least 1",
            ));
        }
        if !(self.consolidation_threshold.is_finite() && self.consolidation_threshold > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "Consolidation threshold must be a positive number",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    ///
    /// An unset variable leaves `target` alone; a set but non-Unicode one is an error.
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        let val = match env::var(env_var_name) {
            Ok(val) => val,
            Err(env::VarError::NotPresent) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(ENV_MAX_RESOLUTION_DEPTH, &mut self.max_resolution_depth)?;
        Self::apply_env_var(ENV_PICKER_MAX_DEPTH, &mut self.picker_max_depth)?;
        Self::apply_env_var(
            ENV_CONSOLIDATION_THRESHOLD,
            &mut self.consolidation_threshold,
        )?;
        Self::apply_env_var(
            ENV_INCOMPATIBLE_UNIT_POLICY,
            &mut self.incompatible_unit_policy,
        )?;
        Ok(self)
    }
}
