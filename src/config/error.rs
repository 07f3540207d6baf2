//! Configuration errors.

use std::time::Duration;
use thiserror::Error;

/// A single rule broken by a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Auto-advance interval must be greater than zero")]
    ZeroInterval,

    #[error("Auto-advance interval {actual:?} exceeds the maximum of {max:?}")]
    IntervalTooLong { max: Duration, actual: Duration },
}

/// Errors that can occur when building or loading a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Every violated rule, not just the first
    #[error("Invalid carousel configuration: {}", format_violations(.0))]
    Invalid(Vec<ConfigViolation>),

    #[error("Failed to parse carousel configuration: {0}")]
    Parse(String),
}

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
