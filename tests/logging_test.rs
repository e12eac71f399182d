// ABOUTME: Tests for logging configuration parsing from the environment
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use meal_planner::logging::{LogFormat, LoggingConfig, DEFAULT_SERVICE_NAME};
use serial_test::serial;

const VARS: [&str; 7] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "LOG_INCLUDE_SPANS",
    "SERVICE_NAME",
];

fn clear_env() {
    for name in VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = LoggingConfig::from_env();
    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
    assert_eq!(config.environment, "development");
    assert!(!config.include_location);
    assert!(!config.include_thread);
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("LOG_INCLUDE_THREAD", "1");
    env::set_var("SERVICE_NAME", "pantry-sync");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_thread);
    assert!(!config.include_location);
    assert_eq!(config.service_name, "pantry-sync");
}

#[test]
#[serial]
fn test_production_turns_on_location_and_thread() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    let config = LoggingConfig::from_env();
    clear_env();
    assert!(config.include_location);
    assert!(config.include_thread);
}

#[test]
fn test_format_parsing_is_lossy() {
    assert_eq!(LogFormat::from_str_lossy("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_lossy(" Json "), LogFormat::Json);
    assert_eq!(LogFormat::from_str_lossy("fancy"), LogFormat::Pretty);
}

#[test]
fn test_summary_reports_settings() {
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };
    let summary = config.summary();
    assert_eq!(summary["service"]["name"], DEFAULT_SERVICE_NAME);
    assert_eq!(summary["logging"]["format"], "compact");
    assert_eq!(summary["logging"]["features"]["spans"], false);
}

#[test]
fn test_filter_pins_planner_crates() {
    let config = LoggingConfig {
        level: "debug".into(),
        ..LoggingConfig::default()
    };
    let rendered = config.env_filter().to_string();
    assert!(rendered.contains("meal_planner_intelligence=debug"));
    assert!(rendered.contains("meal_planner_core=debug"));
}

#[test]
#[serial]
fn test_second_init_fails_instead_of_panicking() {
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };
    let first = config.init();
    assert!(first.is_ok());
    assert!(config.init().is_err());
}
