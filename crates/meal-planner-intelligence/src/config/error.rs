// ABOUTME: Configuration error types for planner engine settings
// ABOUTME: Parse failures from environment overrides and out-of-range values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use meal_planner_core::errors::{AppError, ErrorCode};
use std::env;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let message = error.to_string();
        let app_error = match error {
            ConfigError::ValueOutOfRange(_) => Self::new(ErrorCode::ConfigInvalid, message),
            ConfigError::EnvVar(_) | ConfigError::Parse(_) => Self::config(message),
        };
        app_error.with_source(error)
    }
}
