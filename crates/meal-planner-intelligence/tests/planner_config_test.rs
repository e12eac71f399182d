// ABOUTME: Tests for planner configuration defaults, environment overrides, and validation
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use meal_planner_core::errors::ErrorCode;
use meal_planner_core::AppError;
use meal_planner_intelligence::config::{
    ENV_CONSOLIDATION_THRESHOLD, ENV_INCOMPATIBLE_UNIT_POLICY, ENV_MAX_RESOLUTION_DEPTH,
    ENV_PICKER_MAX_DEPTH,
};
use meal_planner_intelligence::{ConfigError, IncompatibleUnitPolicy, PlannerConfig};
use serial_test::serial;

fn clear_env() {
    for name in [
        ENV_MAX_RESOLUTION_DEPTH,
        ENV_PICKER_MAX_DEPTH,
        ENV_CONSOLIDATION_THRESHOLD,
        ENV_INCOMPATIBLE_UNIT_POLICY,
    ] {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();
    let config = PlannerConfig::load().unwrap();
    assert_eq!(config, PlannerConfig::default());
    assert_eq!(config.max_resolution_depth, 32);
    assert_eq!(config.picker_max_depth, 2);
    assert!((config.consolidation_threshold - 1000.0).abs() < f64::EPSILON);
    assert_eq!(
        config.incompatible_unit_policy,
        IncompatibleUnitPolicy::PassThrough
    );
}

#[test]
#[serial]
fn test_env_overrides_apply() {
    clear_env();
    env::set_var(ENV_MAX_RESOLUTION_DEPTH, "12");
    env::set_var(ENV_PICKER_MAX_DEPTH, " 4 ");
    env::set_var(ENV_CONSOLIDATION_THRESHOLD, "500");
    env::set_var(ENV_INCOMPATIBLE_UNIT_POLICY, "reject");

    let config = PlannerConfig::load().unwrap();
    clear_env();

    assert_eq!(config.max_resolution_depth, 12);
    assert_eq!(config.picker_max_depth, 4);
    assert!((config.consolidation_threshold - 500.0).abs() < f64::EPSILON);
    assert_eq!(config.incompatible_unit_policy, IncompatibleUnitPolicy::Reject);
}

#[test]
#[serial]
fn test_unparseable_env_value_names_the_variable() {
    clear_env();
    env::set_var(ENV_MAX_RESOLUTION_DEPTH, "deep");

    let err = PlannerConfig::load().unwrap_err();
    clear_env();

    assert!(matches!(&err, ConfigError::Parse(msg) if msg.contains(ENV_MAX_RESOLUTION_DEPTH)));
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ConfigError);
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_unicode_env_value_is_an_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    clear_env();
    env::set_var(ENV_PICKER_MAX_DEPTH, OsStr::from_bytes(&[0x66, 0xff, 0x6f]));

    let err = PlannerConfig::load().unwrap_err();
    clear_env();

    assert!(matches!(err, ConfigError::EnvVar(env::VarError::NotUnicode(_))));
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ConfigError);
}

#[test]
#[serial]
fn test_out_of_range_values_fail_validation() {
    clear_env();
    env::set_var(ENV_PICKER_MAX_DEPTH, "0");
    let err = PlannerConfig::load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::ValueOutOfRange(_)));

    env::set_var(ENV_CONSOLIDATION_THRESHOLD, "-5");
    let err = PlannerConfig::load().unwrap_err();
    clear_env();
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_direct_validation() {
    let config = PlannerConfig {
        max_resolution_depth: 0,
        ..PlannerConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(PlannerConfig::default().validate().is_ok());
}
