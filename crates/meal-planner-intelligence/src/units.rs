// ABOUTME: Unit normalization, conversion, and display-unit consolidation for grocery quantities
// ABOUTME: Metric weight and volume scale by fixed factors; other pairs follow IncompatibleUnitPolicy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Unit Converter
//!
//! Only two conversions are known: gram ↔ kilogram and milliliter ↔ liter. Kitchen
//! measures and countable units are never converted, because doing so needs
//! ingredient densities the library does not carry.
//!
//! What happens when a caller asks for an unknown conversion is decided by
//! [`IncompatibleUnitPolicy`]. The plain [`convert_quantity`] function keeps the
//! quantity unchanged; [`convert_quantity_with_policy`] can reject instead.

use std::fmt;
use std::str::FromStr;

use meal_planner_core::constants::units::{
    CONSOLIDATION_THRESHOLD, GRAMS_PER_KILOGRAM, MILLILITERS_PER_LITER,
};
use meal_planner_core::errors::{AppError, ErrorCode};
use meal_planner_core::models::{is_positive, MeasurementUnit, UnitFamily};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PlannerConfig;

/// Unit conversion errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The units have no known conversion factor between them
    #[error("Cannot convert {from} to {to}: no conversion factor between these units")]
    IncompatibleUnits {
        /// Source unit
        from: MeasurementUnit,
        /// Target unit
        to: MeasurementUnit,
    },
    /// Quantity is negative, zero, or not finite
    #[error("Invalid quantity {0} (must be finite and positive)")]
    InvalidQuantity(f64),
}

impl From<ConversionError> for AppError {
    fn from(error: ConversionError) -> Self {
        let code = match error {
            ConversionError::IncompatibleUnits { .. } => ErrorCode::InvalidInput,
            ConversionError::InvalidQuantity(_) => ErrorCode::ValueOutOfRange,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// What to do when asked to convert between units with no known factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompatibleUnitPolicy {
    /// Return the quantity unchanged
    #[default]
    PassThrough,
    /// Fail with [`ConversionError::IncompatibleUnits`]
    Reject,
}

impl IncompatibleUnitPolicy {
    /// Config-file spelling of the policy
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PassThrough => "pass_through",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for IncompatibleUnitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncompatibleUnitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pass_through" | "passthrough" => Ok(Self::PassThrough),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "Unknown incompatible unit policy '{other}' (expected pass_through or reject)"
            )),
        }
    }
}

/// Canonical unit and the factor that takes one `unit` into it
///
/// Only metric weight and volume have a canonical unit; kitchen measures and counts
/// have none and never convert.
fn canonical_factor(unit: MeasurementUnit) -> Option<(MeasurementUnit, f64)> {
    let canonical = match unit.family() {
        UnitFamily::Weight => MeasurementUnit::Gram,
        UnitFamily::Volume => MeasurementUnit::Milliliter,
        UnitFamily::KitchenMeasure | UnitFamily::Count => return None,
    };
    let factor = match unit {
        MeasurementUnit::Kilogram => GRAMS_PER_KILOGRAM,
        MeasurementUnit::Liter => MILLILITERS_PER_LITER,
        _ => 1.0,
    };
    Some((canonical, factor))
}

/// Multiplier taking a quantity in `from` to `to`, if the pair is convertible
fn scale_between(from: MeasurementUnit, to: MeasurementUnit) -> Option<f64> {
    if from == to {
        return Some(1.0);
    }
    let (from_canonical, from_factor) = canonical_factor(from)?;
    let (to_canonical, to_factor) = canonical_factor(to)?;
    (from_canonical == to_canonical).then(|| from_factor / to_factor)
}

/// Merge-key unit: kilogram becomes gram, liter becomes milliliter, anything else is itself
#[must_use]
pub fn normalize_unit_for_consolidation(unit: MeasurementUnit) -> MeasurementUnit {
    canonical_factor(unit).map_or(unit, |(canonical, _)| canonical)
}

/// Convert `quantity` from one unit to another
///
/// Pairs with no known factor return `quantity` unchanged.
#[must_use]
pub fn convert_quantity(quantity: f64, from: MeasurementUnit, to: MeasurementUnit) -> f64 {
    scale_between(from, to).map_or(quantity, |scale| quantity * scale)
}

/// Convert `quantity` from one unit to another under an explicit policy
///
/// # Errors
///
/// Returns [`ConversionError::InvalidQuantity`] for a quantity that is not finite and
/// positive, and [`ConversionError::IncompatibleUnits`] when the pair has no factor and
/// the policy is [`IncompatibleUnitPolicy::Reject`]
pub fn convert_quantity_with_policy(
    quantity: f64,
    from: MeasurementUnit,
    to: MeasurementUnit,
    policy: IncompatibleUnitPolicy,
) -> Result<f64, ConversionError> {
    if !is_positive(quantity) {
        return Err(ConversionError::InvalidQuantity(quantity));
    }
    match (scale_between(from, to), policy) {
        (Some(scale), _) => Ok(quantity * scale),
        (None, IncompatibleUnitPolicy::PassThrough) => Ok(quantity),
        (None, IncompatibleUnitPolicy::Reject) => {
            Err(ConversionError::IncompatibleUnits { from, to })
        }
    }
}

/// Pick the display unit: 1000 g or more becomes kilograms, 1000 ml or more becomes liters
#[must_use]
pub fn consolidate_unit(quantity: f64, unit: MeasurementUnit) -> (f64, MeasurementUnit) {
    consolidate_unit_with_threshold(quantity, unit, CONSOLIDATION_THRESHOLD)
}

/// [`consolidate_unit`] with a configurable switch-over point (inclusive)
#[must_use]
pub fn consolidate_unit_with_threshold(
    quantity: f64,
    unit: MeasurementUnit,
    threshold: f64,
) -> (f64, MeasurementUnit) {
    match unit {
        MeasurementUnit::Gram if quantity >= threshold => {
            (quantity / GRAMS_PER_KILOGRAM, MeasurementUnit::Kilogram)
        }
        MeasurementUnit::Milliliter if quantity >= threshold => {
            (quantity / MILLILITERS_PER_LITER, MeasurementUnit::Liter)
        }
        _ => (quantity, unit),
    }
}

/// Conversion settings bundled for the aggregator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    policy: IncompatibleUnitPolicy,
    consolidation_threshold: f64,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self {
            policy: IncompatibleUnitPolicy::default(),
            consolidation_threshold: CONSOLIDATION_THRESHOLD,
        }
    }
}

impl UnitConverter {
    /// Converter with an explicit policy and threshold
    #[must_use]
    pub const fn new(policy: IncompatibleUnitPolicy, consolidation_threshold: f64) -> Self {
        Self {
            policy,
            consolidation_threshold,
        }
    }

    /// Converter using the planner configuration
    #[must_use]
    pub const fn from_config(config: &PlannerConfig) -> Self {
        Self::new(
            config.incompatible_unit_policy,
            config.consolidation_threshold,
        )
    }

    /// Active policy
    #[must_use]
    pub const fn policy(&self) -> IncompatibleUnitPolicy {
        self.policy
    }

    /// Convert under this converter's policy
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidQuantity`] for a non-positive quantity and
    /// [`ConversionError::IncompatibleUnits`] under the `Reject` policy
    pub fn convert(
        &self,
        quantity: f64,
        from: MeasurementUnit,
        to: MeasurementUnit,
    ) -> Result<f64, ConversionError> {
        convert_quantity_with_policy(quantity, from, to, self.policy)
    }

    /// Consolidate using this converter's threshold
    #[must_use]
    pub fn consolidate(&self, quantity: f64, unit: MeasurementUnit) -> (f64, MeasurementUnit) {
        consolidate_unit_with_threshold(quantity, unit, self.consolidation_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parses_config_spellings() {
        assert_eq!(
            "pass-through".parse::<IncompatibleUnitPolicy>(),
            Ok(IncompatibleUnitPolicy::PassThrough)
        );
        assert_eq!(
            " Reject ".parse::<IncompatibleUnitPolicy>(),
            Ok(IncompatibleUnitPolicy::Reject)
        );
        assert!("strict".parse::<IncompatibleUnitPolicy>().is_err());
    }

    #[test]
    fn test_scale_between_families() {
        assert_eq!(
            scale_between(MeasurementUnit::Liter, MeasurementUnit::Milliliter),
            Some(1000.0)
        );
        assert_eq!(
            scale_between(MeasurementUnit::Gram, MeasurementUnit::Liter),
            None
        );
        assert_eq!(
            scale_between(MeasurementUnit::Cup, MeasurementUnit::Cup),
            Some(1.0)
        );
    }
}
